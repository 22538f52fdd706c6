//! Errors raised while constructing the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("amount is empty")]
    EmptyAmount,

    #[error("malformed amount: {0:?}")]
    MalformedAmount(String),

    #[error("amount {0:?} is smaller than one stroop")]
    BelowStroop(String),

    #[error("amount {0:?} does not fit in 64 bits of stroops")]
    AmountOverflow(String),

    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),
}
