use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Offset {offset:08x} is outside the file (length {len})")]
    OutOfRange { offset: usize, len: usize },

    #[error("Invalid byte value: {0}")]
    InvalidValue(String),

    #[error("Search term not found")]
    NotFound,

    #[error("No bookmarks set")]
    Empty,
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
