//! Dataset source implementations

mod local_file;

pub use local_file::LocalFileSource;
