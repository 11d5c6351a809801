pub mod joyo;
pub mod parser;
pub mod reader;

pub use joyo::{JoyoError, JoyoSet};
pub use parser::{ParseError, RecordParser, ReferenceWork, parse_line};
pub use reader::{KanjiReader, ReaderError, Records};
