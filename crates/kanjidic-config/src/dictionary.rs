use std::env;

use serde::{Deserialize, Serialize};

fn default_encoding() -> String {
    "EUC-JP".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Path of the KANJIDIC file
    pub path: Option<String>,
    /// WHATWG label of the file encoding
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Joyo list, required to open a dictionary
    pub joyo_path: Option<String>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: None,
            encoding: default_encoding(),
            joyo_path: None,
        }
    }
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            path: env::var("KANJIDIC_PATH").ok(),
            encoding: env::var("KANJIDIC_ENCODING").unwrap_or(defaults.encoding),
            joyo_path: env::var("KANJIDIC_JOYO_PATH").ok(),
        }
    }
}
