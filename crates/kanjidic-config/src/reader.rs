use std::env;

use kanjidic_core::MalformedPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReaderConfig {
    pub malformed: MalformedPolicy,
}

impl ReaderConfig {
    pub fn new() -> Self {
        // "true"/"false", or a policy name
        let malformed = env::var("KANJIDIC_SKIP_MALFORMED")
            .ok()
            .and_then(|v| match v.parse::<bool>() {
                Ok(true) => Some(MalformedPolicy::Skip),
                Ok(false) => Some(MalformedPolicy::Strict),
                Err(_) => MalformedPolicy::from_str(&v),
            })
            .unwrap_or_default();

        Self { malformed }
    }
}
