use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::reader::ReaderConfig;

pub mod dictionary;
pub mod reader;

fn default_log_filter() -> String {
    "warn".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub reader: ReaderConfig,

    /// `tracing` filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig::default(),
            reader: ReaderConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Defaults overridden by KANJIDIC_* environment variables
    pub fn new() -> Self {
        let log_filter = env::var("KANJIDIC_LOG").unwrap_or_else(|_| default_log_filter());

        Config {
            dictionary: DictionaryConfig::new(),
            reader: ReaderConfig::new(),
            log_filter,
        }
    }

    /// Load a JSON config file; missing keys take their defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}
