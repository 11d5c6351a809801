use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};

use kanjidic_core::{EncodingDecoder, LineDecoder, LineSource, SourceError};
use memmap2::Mmap;

/// Line source over a memory-mapped dictionary file.
///
/// Opening scans the bytes once for line starts; lines are decoded only when
/// asked for, so the decoded text of the file is never held as a whole.
pub struct FileLineSource<D = EncodingDecoder> {
    path: PathBuf,
    map: Mmap,
    starts: Vec<usize>,
    decoder: D,
}

impl FileLineSource<EncodingDecoder> {
    /// Open an EUC-JP encoded file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Self::with_decoder(path, EncodingDecoder::euc_jp())
    }
}

impl<D: LineDecoder> FileLineSource<D> {
    pub fn with_decoder(path: impl AsRef<Path>, decoder: D) -> Result<Self, SourceError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SourceError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        // Read-only mapping; the file is not expected to change while open
        let map = unsafe { Mmap::map(&file) }?;
        let starts = index_lines(&map);

        tracing::info!(
            "Opened {} ({} lines, {})",
            path.display(),
            starts.len(),
            decoder.encoding().name()
        );

        Ok(Self {
            path: path.to_path_buf(),
            map,
            starts,
            decoder,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw bytes of a line, without its terminator
    fn raw_line(&self, index: usize) -> Option<&[u8]> {
        let start = *self.starts.get(index)?;
        let bytes: &[u8] = &self.map;
        let line = match self.starts.get(index + 1) {
            Some(next) => &bytes[start..next - 1],
            None => {
                let rest = &bytes[start..];
                rest.strip_suffix(b"\n").unwrap_or(rest)
            }
        };
        Some(line)
    }
}

impl<D: LineDecoder> LineSource for FileLineSource<D> {
    fn line(&self, index: usize) -> Result<Option<Cow<'_, str>>, SourceError> {
        self.raw_line(index)
            .map(|raw| self.decoder.decode(raw, index))
            .transpose()
    }

    fn len(&self) -> usize {
        self.starts.len()
    }
}

/// Byte offset of every line start. A final newline does not open a new line.
fn index_lines(bytes: &[u8]) -> Vec<usize> {
    if bytes.is_empty() {
        return Vec::new();
    }

    let mut starts = vec![0];
    starts.extend(
        bytes
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .map(|(i, _)| i + 1)
            .filter(|&start| start < bytes.len()),
    );
    starts
}
