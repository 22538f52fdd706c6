use thiserror::Error;

use tipjar_ledger::LedgerError;
use tipjar_transactions::TxError;
use tipjar_wallet_core::WalletError;

/// Text used when a failure carries neither a result code nor a message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A tip refused before any wallet or ledger call. The display text is the
/// status line shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TipRejection {
    #[error("Please connect your wallet first!")]
    NotConnected,

    #[error("Please enter a valid amount!")]
    InvalidAmount,

    #[error("Minimum tip is 0.0000001 XLM")]
    BelowMinimum,

    #[error("A tip is already being submitted.")]
    AlreadySubmitting,

    #[error("Please wait for the wallet to finish connecting.")]
    WalletBusy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TipError {
    #[error(transparent)]
    Rejected(#[from] TipRejection),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Transaction(#[from] TxError),

    #[error("invalid account address: {0}")]
    InvalidAccount(String),

    #[error("wallet returned a different transaction than it was asked to sign")]
    EnvelopeMismatch,

    #[error("a wallet request is already in progress")]
    Busy,

    #[error("the session was disconnected while the request was in flight")]
    Superseded,
}

impl TipError {
    /// The failure reason for the status line: the ledger's result code when
    /// there is one, else the error's own message, else [`UNKNOWN_ERROR`].
    pub fn reason(&self) -> String {
        if let Self::Ledger(e) = self {
            if let Some(code) = e.result_code().filter(|c| !c.trim().is_empty()) {
                return code.to_string();
            }
        }

        let message = match self {
            Self::Wallet(WalletError::Rejected(msg)) => msg.clone(),
            Self::Ledger(LedgerError::Rejected { detail, .. }) => detail.clone(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}
