pub mod file;

pub use file::FileLineSource;
