use std::sync::Arc;

use anyhow::Context;
use kanjidic_config::Config;
use kanjidic_config::dictionary::DictionaryConfig;
use kanjidic_core::EncodingDecoder;
use kanjidic_io::FileLineSource;
use kanjidic_lang_japanese::{JoyoSet, KanjiReader, RecordParser};

pub fn load_joyo(config: &DictionaryConfig) -> anyhow::Result<JoyoSet> {
    let path = config
        .joyo_path
        .as_deref()
        .context("No joyo list given; pass --joyo or set KANJIDIC_JOYO_PATH")?;

    let joyo = JoyoSet::load_from_file(path)?;
    tracing::info!("Loaded {} joyo characters from {}", joyo.len(), path);
    Ok(joyo)
}

pub fn open_reader(config: &Config) -> anyhow::Result<KanjiReader<FileLineSource>> {
    let path = config
        .dictionary
        .path
        .as_deref()
        .context("No dictionary given; pass --dict or set KANJIDIC_PATH")?;

    let decoder = EncodingDecoder::for_label(&config.dictionary.encoding)?;
    let source = FileLineSource::with_decoder(path, decoder)
        .with_context(|| format!("Failed to open dictionary {path}"))?;
    let parser = RecordParser::new(Arc::new(load_joyo(&config.dictionary)?));

    tracing::debug!(
        "Reading {} with {} handling of malformed lines",
        source.path().display(),
        config.reader.malformed.as_str()
    );
    Ok(KanjiReader::open(source, parser).with_policy(config.reader.malformed))
}
