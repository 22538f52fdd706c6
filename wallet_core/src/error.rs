use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("wallet unavailable")]
    Unavailable,

    #[error("wallet returned no address")]
    NoAddress,

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("network mismatch: wallet signs for {expected:?}, asked for {requested:?}")]
    NetworkMismatch { expected: String, requested: String },

    #[error("key error: {0}")]
    Key(String),

    #[error("keystore error: {0}")]
    Keystore(String),

    #[error("signing error: {0}")]
    Signing(String),
}
