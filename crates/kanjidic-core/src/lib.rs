pub mod error;
pub mod preprocess;
pub mod source;
pub mod types;

pub use error::SourceError;
pub use preprocess::{EncodingDecoder, LineDecoder};
pub use source::{LineSource, MemoryLineSource};
pub use types::MalformedPolicy;
