use std::collections::HashMap;
use std::sync::Arc;

use kanjidic_core::{LineSource, MalformedPolicy, SourceError};
use kanjidic_types::KanjiRecord;

use crate::parser::{ParseError, RecordParser};

/// Line index of the first record; line 0 is the header
pub const FIRST_RECORD: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Line {index}: {source}")]
    Parse { index: usize, source: ParseError },
}

/// Sequential and keyed access to a KANJIDIC line source.
///
/// Every record read is cached by character. `lookup` scans forward from
/// where the previous lookup stopped and never goes back, so a character
/// whose line lies behind that point is only found if it was already cached.
/// Query in file order, or iterate the whole file first.
pub struct KanjiReader<S> {
    source: S,
    parser: RecordParser,
    policy: MalformedPolicy,
    cursor: usize,
    cache: HashMap<String, Arc<KanjiRecord>>,
    last_sought: usize,
}

impl<S: LineSource> KanjiReader<S> {
    pub fn open(source: S, parser: RecordParser) -> Self {
        Self {
            source,
            parser,
            policy: MalformedPolicy::default(),
            cursor: FIRST_RECORD,
            cache: HashMap::new(),
            last_sought: 0,
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rewind iteration; the cache is kept
    pub fn reset(&mut self) {
        self.cursor = FIRST_RECORD;
    }

    /// Record at the cursor, then move the cursor on.
    ///
    /// `Ok(None)` marks the end: past the last line, or a header line.
    pub fn advance(&mut self) -> Result<Option<Arc<KanjiRecord>>, ReaderError> {
        loop {
            if self.cursor >= self.source.len() {
                return Ok(None);
            }

            let index = self.cursor;
            self.cursor += 1;

            match self.load(index) {
                Err(ReaderError::Parse { index, source }) if self.skips_malformed() => {
                    skip_malformed(index, &source);
                }
                result => return result,
            }
        }
    }

    /// Record at any line, cursor untouched
    pub fn read_at(&mut self, index: usize) -> Result<Option<Arc<KanjiRecord>>, ReaderError> {
        match self.load(index) {
            Err(ReaderError::Parse { index, source }) if self.skips_malformed() => {
                skip_malformed(index, &source);
                Ok(None)
            }
            result => result,
        }
    }

    /// Find a record by its character, from the cache or by scanning forward
    pub fn lookup(&mut self, character: &str) -> Result<Option<Arc<KanjiRecord>>, ReaderError> {
        if let Some(record) = self.cache.get(character) {
            tracing::trace!("Cache hit for {character}");
            return Ok(Some(Arc::clone(record)));
        }

        let start = self.last_sought;
        for index in start..self.source.len() {
            self.last_sought = index;

            let record = match self.read_at(index) {
                // The next lookup resumes past the bad line
                Err(err @ ReaderError::Parse { .. }) => {
                    self.last_sought = index + 1;
                    return Err(err);
                }
                result => result?,
            };

            match record {
                Some(record) if record.character == character => {
                    tracing::debug!("Found {character} at line {index}");
                    return Ok(Some(record));
                }
                _ => {}
            }
        }

        tracing::debug!(
            "{character} not found scanning lines {start}..{}",
            self.source.len()
        );
        Ok(None)
    }

    /// Iterate from the cursor to the end
    pub fn records(&mut self) -> Records<'_, S> {
        Records { reader: self }
    }

    pub fn cached(&self, character: &str) -> Option<Arc<KanjiRecord>> {
        self.cache.get(character).cloned()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn last_sought(&self) -> usize {
        self.last_sought
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    fn skips_malformed(&self) -> bool {
        self.policy == MalformedPolicy::Skip
    }

    /// Read, parse and cache one line
    fn load(&mut self, index: usize) -> Result<Option<Arc<KanjiRecord>>, ReaderError> {
        let Some(line) = self.source.line(index)? else {
            return Ok(None);
        };

        let record = self
            .parser
            .parse(&line)
            .map_err(|source| ReaderError::Parse { index, source })?;

        Ok(record.map(|record| {
            let record = Arc::new(record);
            self.cache
                .insert(record.character.clone(), Arc::clone(&record));
            record
        }))
    }
}

fn skip_malformed(index: usize, error: &ParseError) {
    tracing::warn!("Skipping line {index}: {error}");
}

/// Records from the cursor on, see [`KanjiReader::advance`]
pub struct Records<'a, S> {
    reader: &'a mut KanjiReader<S>,
}

impl<S: LineSource> Iterator for Records<'_, S> {
    type Item = Result<Arc<KanjiRecord>, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.advance().transpose()
    }
}
