//! Error types for huffproc

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("illegal header: expected tag {expected:#010x}, found {found:#010x}")]
    BadHeaderTag { expected: u32, found: u32 },

    #[error("input ended while reading the tree header")]
    TruncatedHeader,

    #[error("input ended before the end-of-stream code")]
    TruncatedStream,

    #[error("empty input")]
    EmptyInput,

    #[error("no code for symbol {0}")]
    UnencodableSymbol(u16),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("input exceeds the configured limit of {limit} bytes")]
    InputTooLarge { limit: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),
}
