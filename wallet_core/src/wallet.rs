//! A local signer that plays the part of a browser wallet.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use tipjar_crypto::derive_address;
use tipjar_transactions::TransactionEnvelope;
use tipjar_types::{AccountAddress, KeyPair, Network};

use crate::error::WalletError;
use crate::keys::keypair_from_secret_seed;
use crate::keystore::{decrypt_keystore, load_keystore};
use crate::provider::WalletProvider;

/// Status shown when the daemon was started without a key.
pub const NO_SIGNING_KEY_MESSAGE: &str =
    "No signing key loaded. Start the tip jar with a keystore or secret seed.";

/// Status shown while the local key signs. It does not prompt anyone.
pub const LOCAL_SIGNING_MESSAGE: &str = "Building transaction... Signing with the local key.";

/// Holds at most one ed25519 key and signs only for the network it is bound to.
///
/// A wallet with no key reports itself unavailable, the same way a missing
/// browser extension would.
pub struct KeystoreWallet {
    keys: Option<KeyPair>,
    network: Network,
    unavailable_message: String,
}

impl KeystoreWallet {
    /// A wallet with no key loaded.
    pub fn empty(network: Network) -> Self {
        Self {
            keys: None,
            network,
            unavailable_message: NO_SIGNING_KEY_MESSAGE.to_string(),
        }
    }

    pub fn from_keypair(keys: KeyPair, network: Network) -> Self {
        Self {
            keys: Some(keys),
            network,
            unavailable_message: NO_SIGNING_KEY_MESSAGE.to_string(),
        }
    }

    /// Load from an `S...` secret seed.
    pub fn from_secret_seed(seed: &str, network: Network) -> Result<Self, WalletError> {
        Ok(Self::from_keypair(keypair_from_secret_seed(seed)?, network))
    }

    /// Open an encrypted keystore file.
    pub fn from_keystore_file(
        path: &Path,
        password: &str,
        network: Network,
    ) -> Result<Self, WalletError> {
        let keystore = load_keystore(path)?;
        let keys = decrypt_keystore(&keystore, password)?;
        info!(address = %keystore.address, "keystore opened");
        Ok(Self::from_keypair(keys, network))
    }

    /// Address of the loaded key, if any.
    pub fn address(&self) -> Option<AccountAddress> {
        self.keys.as_ref().map(|k| derive_address(&k.public))
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Replace the status shown when no key is loaded, e.g. to name the
    /// flags or variables that supply one.
    pub fn with_unavailable_message(mut self, message: impl Into<String>) -> Self {
        self.unavailable_message = message.into();
        self
    }
}

#[async_trait]
impl WalletProvider for KeystoreWallet {
    async fn is_available(&self) -> bool {
        self.keys.is_some()
    }

    async fn request_address(&self) -> Result<AccountAddress, WalletError> {
        self.address().ok_or(WalletError::NoAddress)
    }

    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
        network_passphrase: &str,
    ) -> Result<TransactionEnvelope, WalletError> {
        let keys = self.keys.as_ref().ok_or(WalletError::Unavailable)?;

        if network_passphrase != self.network.passphrase {
            return Err(WalletError::NetworkMismatch {
                expected: self.network.passphrase.to_string(),
                requested: network_passphrase.to_string(),
            });
        }
        if envelope.tx.source_account != keys.public {
            return Err(WalletError::Rejected(
                "transaction source is not this wallet's account".to_string(),
            ));
        }

        let mut signed = envelope.clone();
        signed
            .sign(network_passphrase, keys)
            .map_err(|e| WalletError::Signing(e.to_string()))?;
        debug!(signatures = signed.signatures.len(), "envelope signed");
        Ok(signed)
    }

    fn unavailable_message(&self) -> String {
        self.unavailable_message.clone()
    }

    fn signing_message(&self) -> String {
        LOCAL_SIGNING_MESSAGE.to_string()
    }
}
