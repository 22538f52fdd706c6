use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TxError {
    #[error("transaction has no operations")]
    NoOperations,

    #[error("too many operations: {0} > {max}", max = crate::MAX_OPERATIONS)]
    TooManyOperations(usize),

    #[error("timeout must be set before building")]
    MissingTimeout,

    #[error("fee overflow: base fee {base_fee} x {operations} operations")]
    FeeOverflow { base_fee: u32, operations: usize },

    #[error("sequence number {0} cannot be incremented")]
    SequenceOverflow(i64),

    #[error("payment amount must be positive")]
    NonPositiveAmount,

    #[error("XDR truncated: needed {needed} bytes at offset {offset}")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("XDR has {0} trailing bytes")]
    TrailingBytes(usize),

    #[error("unsupported {what} discriminant {value}")]
    UnsupportedDiscriminant { what: &'static str, value: i32 },

    #[error("{what} length {len} exceeds maximum {max}")]
    LengthExceeded { what: &'static str, len: usize, max: usize },

    #[error("XDR padding bytes must be zero")]
    NonZeroPadding,

    #[error("invalid base64 envelope: {0}")]
    Base64(String),
}
