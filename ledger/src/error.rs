use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// The ledger refused the transaction. `result_code` is the
    /// transaction-level code such as `tx_bad_seq` when one was reported.
    #[error("transaction rejected: {detail}")]
    Rejected {
        result_code: Option<String>,
        operation_codes: Vec<String>,
        detail: String,
    },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LedgerError {
    /// The transaction-level result code, if the ledger reported one.
    pub fn result_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { result_code, .. } => result_code.as_deref(),
            _ => None,
        }
    }
}
