use serde::{Deserialize, Serialize};

/// What a reader does with a line that lacks a mandatory field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Hand the parse error to the caller
    #[default]
    Strict,
    /// Log it and carry on as if the line held no record
    Skip,
}

impl MalformedPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(MalformedPolicy::Strict),
            "skip" => Some(MalformedPolicy::Skip),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MalformedPolicy::Strict => "strict",
            MalformedPolicy::Skip => "skip",
        }
    }
}
