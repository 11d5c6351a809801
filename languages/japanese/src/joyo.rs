use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum JoyoError {
    #[error("Failed to read joyo list {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Characters taught in Japanese schools.
///
/// Only membership matters; the parser flags a record as joyo when its
/// character is in the set. There is no built-in list, the full set comes
/// from a file.
#[derive(Debug, Clone, Default)]
pub struct JoyoSet {
    chars: HashSet<String>,
}

impl JoyoSet {
    /// Create empty set
    pub fn new() -> Self {
        Self {
            chars: HashSet::new(),
        }
    }

    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().map(String::from).collect(),
        }
    }

    /// Load from a UTF-8 text file; every non-whitespace character is a member
    /// and lines starting with `#` are comments
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, JoyoError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| JoyoError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self::parse(&content))
    }

    fn parse(content: &str) -> Self {
        let chars = content
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::chars)
            .filter(|c| !c.is_whitespace());

        Self::from_chars(chars)
    }

    pub fn contains(&self, character: &str) -> bool {
        self.chars.contains(character)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
