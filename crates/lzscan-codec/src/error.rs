use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Output buffer too small: need {needed} bytes, capacity {capacity}")]
    OutputTooSmall { needed: usize, capacity: usize },
    #[error("Back-reference before start of output at input offset {position}")]
    CorruptReference { position: usize },
    #[error("Compressed input truncated at offset {position}")]
    TruncatedInput { position: usize },
    #[error("Record too short: {len} bytes")]
    RecordTooShort { len: usize },
    #[error("Input of {0} bytes does not fit a record")]
    InputTooLarge(usize),
    #[error("Invalid record length: {0}")]
    InvalidLength(i32),
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Invalid hex text: {0}")]
    InvalidHex(String),
    #[error("Decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

pub type Result<T> = std::result::Result<T, CodecError>;
