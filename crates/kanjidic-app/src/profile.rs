use anyhow::Context;
use kanjidic_config::Config;
use kanjidic_core::MalformedPolicy;

use crate::Cli;

/// Config from the file given with --config, else from defaults and
/// environment; command-line flags win over both
pub fn resolve(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::new(),
    };

    if let Some(dict) = &cli.dict {
        config.dictionary.path = Some(dict.clone());
    }
    if let Some(encoding) = &cli.encoding {
        config.dictionary.encoding = encoding.clone();
    }
    if let Some(joyo) = &cli.joyo {
        config.dictionary.joyo_path = Some(joyo.clone());
    }
    if cli.skip_malformed {
        config.reader.malformed = MalformedPolicy::Skip;
    }

    Ok(config)
}
