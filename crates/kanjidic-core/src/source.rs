use std::borrow::Cow;

use crate::error::SourceError;

/// Random access to the decoded lines of a dictionary file.
///
/// Index 0 is the header line; records start at 1. Implementations should
/// not need the whole file in memory to answer `line`.
pub trait LineSource {
    /// Decoded line at `index`, `None` once past the end
    fn line(&self, index: usize) -> Result<Option<Cow<'_, str>>, SourceError>;

    /// Number of lines, header included
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: LineSource + ?Sized> LineSource for &S {
    fn line(&self, index: usize) -> Result<Option<Cow<'_, str>>, SourceError> {
        (**self).line(index)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Lines already held as text
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSource {
    lines: Vec<String>,
}

impl MemoryLineSource {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split a whole dictionary text on line breaks
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

impl LineSource for MemoryLineSource {
    fn line(&self, index: usize) -> Result<Option<Cow<'_, str>>, SourceError> {
        Ok(self.lines.get(index).map(|l| Cow::Borrowed(l.as_str())))
    }

    fn len(&self) -> usize {
        self.lines.len()
    }
}
