use std::io::Write;

use kanjidic_core::LineSource;
use kanjidic_lang_japanese::KanjiReader;
use kanjidic_types::KanjiRecord;

fn write_record(out: &mut impl Write, record: &KanjiRecord) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    writeln!(out)?;
    Ok(())
}

/// Write records from the cursor on, returns how many were written
pub fn dump<S: LineSource>(
    reader: &mut KanjiReader<S>,
    limit: Option<usize>,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let mut count = 0;

    for record in reader.records().take(limit.unwrap_or(usize::MAX)) {
        write_record(out, &*record?)?;
        count += 1;
    }

    tracing::info!("Dumped {count} records");
    Ok(count)
}

/// Look up every non-space character of `chars` in order, returns the misses
pub fn lookup<S: LineSource>(
    reader: &mut KanjiReader<S>,
    chars: &str,
    out: &mut impl Write,
) -> anyhow::Result<Vec<String>> {
    let mut misses = Vec::new();

    for character in chars.chars().filter(|c| !c.is_whitespace()) {
        let key = character.to_string();
        match reader.lookup(&key)? {
            Some(record) => write_record(out, &record)?,
            None => misses.push(key),
        }
    }

    Ok(misses)
}

/// Write the record at `index`, false when the line holds none
pub fn line<S: LineSource>(
    reader: &mut KanjiReader<S>,
    index: usize,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match reader.read_at(index)? {
        Some(record) => {
            write_record(out, &record)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
