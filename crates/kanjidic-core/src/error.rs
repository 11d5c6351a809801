#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Line {index} is not valid {encoding}")]
    Decode {
        index: usize,
        encoding: &'static str,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
