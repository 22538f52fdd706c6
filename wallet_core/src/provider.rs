use async_trait::async_trait;
use tipjar_transactions::TransactionEnvelope;
use tipjar_types::AccountAddress;

use crate::error::WalletError;

/// Status shown when no browser wallet can be reached.
pub const INSTALL_WALLET_MESSAGE: &str = "Please install the Freighter wallet extension!";

/// Status shown while a browser wallet prompts the visitor to sign.
pub const SIGN_PROMPT_MESSAGE: &str = "Building transaction... Please check Freighter to sign.";

/// A wallet the controller can ask for an address and for signatures.
///
/// Every call is a single attempt; a rejected prompt surfaces as
/// [`WalletError::Rejected`].
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether the wallet can be reached at all.
    async fn is_available(&self) -> bool;

    /// Ask the wallet for the active account.
    async fn request_address(&self) -> Result<AccountAddress, WalletError>;

    /// Return `envelope` with the wallet's signature for `network_passphrase` appended.
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
        network_passphrase: &str,
    ) -> Result<TransactionEnvelope, WalletError>;

    /// Status text for when [`is_available`](Self::is_available) is false.
    fn unavailable_message(&self) -> String {
        INSTALL_WALLET_MESSAGE.to_string()
    }

    /// Status text while a transaction is built and handed over for signing.
    fn signing_message(&self) -> String {
        SIGN_PROMPT_MESSAGE.to_string()
    }
}
