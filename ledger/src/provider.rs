use async_trait::async_trait;
use tipjar_transactions::TransactionEnvelope;
use tipjar_types::AccountAddress;

use crate::account::{AccountState, SubmitResult};
use crate::error::LedgerError;

/// Read and write access to the ledger.
///
/// Implementations perform a single attempt per call. Callers decide what a
/// failure means.
#[async_trait]
pub trait LedgerProvider: Send + Sync {
    /// Load an account's sequence number and balances.
    async fn load_account(&self, address: &AccountAddress) -> Result<AccountState, LedgerError>;

    /// Current per-operation base fee in stroops.
    async fn fetch_base_fee(&self) -> Result<u32, LedgerError>;

    /// Submit a signed envelope and wait for the ledger's verdict.
    async fn submit(&self, envelope: &TransactionEnvelope) -> Result<SubmitResult, LedgerError>;
}
