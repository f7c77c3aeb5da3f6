use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("At least one terminator is required")]
    NoTerminators,
    #[error("Terminators cannot be empty")]
    EmptyTerminator,
    #[error("Escape cannot be the same as a terminator: {0:?}")]
    EscapeIsTerminator(String),
    #[error("Position {position} out of range for length {length}")]
    OutOfRange { position: usize, length: usize },
    #[error("Position {0} is not on a char boundary")]
    NotCharBoundary(usize),
}

pub type Result<T> = std::result::Result<T, ScanError>;
