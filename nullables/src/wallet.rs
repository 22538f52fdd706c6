//! Nullable wallet: a scriptable signer that records its prompts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tipjar_crypto::{derive_address, keypair_from_seed};
use tipjar_transactions::TransactionEnvelope;
use tipjar_types::{AccountAddress, KeyPair};
use tipjar_wallet_core::{WalletError, WalletProvider};

use crate::gate::{lock, Gate, GateQueue};

const DEFAULT_SEED: [u8; 32] = [7u8; 32];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletCall {
    IsAvailable,
    RequestAddress,
    Sign {
        envelope: TransactionEnvelope,
        network_passphrase: String,
    },
}

/// A wallet that signs with a fixed test key unless told otherwise.
pub struct NullWallet {
    keys: KeyPair,
    available: AtomicBool,
    address_answer: Mutex<Option<Result<AccountAddress, WalletError>>>,
    sign_failure: Mutex<Option<WalletError>>,
    unavailable_message: Mutex<Option<String>>,
    calls: Mutex<Vec<WalletCall>>,
    sign_gates: GateQueue,
}

impl NullWallet {
    /// An available wallet holding the default test key.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keys: keypair_from_seed(&seed),
            available: AtomicBool::new(true),
            address_answer: Mutex::new(None),
            sign_failure: Mutex::new(None),
            unavailable_message: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            sign_gates: GateQueue::default(),
        }
    }

    /// A wallet that is not installed.
    pub fn unavailable() -> Self {
        let wallet = Self::new();
        wallet.set_available(false);
        wallet
    }

    /// The address this wallet hands out by default.
    pub fn address(&self) -> AccountAddress {
        derive_address(&self.keys.public)
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Override what `request_address` returns.
    pub fn answer_address(&self, answer: Result<AccountAddress, WalletError>) {
        *lock(&self.address_answer) = Some(answer);
    }

    /// Make every subsequent `sign` fail with `err`.
    pub fn fail_signing(&self, err: WalletError) {
        *lock(&self.sign_failure) = Some(err);
    }

    pub fn set_unavailable_message(&self, message: impl Into<String>) {
        *lock(&self.unavailable_message) = Some(message.into());
    }

    /// Hold the next `sign` open until the returned gate is released.
    pub fn hold_next_sign(&self) -> Gate {
        self.sign_gates.push()
    }

    pub fn calls(&self) -> Vec<WalletCall> {
        lock(&self.calls).clone()
    }

    pub fn sign_count(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| matches!(c, WalletCall::Sign { .. }))
            .count()
    }

    fn record(&self, call: WalletCall) {
        lock(&self.calls).push(call);
    }
}

impl Default for NullWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletProvider for NullWallet {
    async fn is_available(&self) -> bool {
        self.record(WalletCall::IsAvailable);
        self.available.load(Ordering::SeqCst)
    }

    async fn request_address(&self) -> Result<AccountAddress, WalletError> {
        self.record(WalletCall::RequestAddress);
        lock(&self.address_answer)
            .clone()
            .unwrap_or_else(|| Ok(self.address()))
    }

    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
        network_passphrase: &str,
    ) -> Result<TransactionEnvelope, WalletError> {
        self.record(WalletCall::Sign {
            envelope: envelope.clone(),
            network_passphrase: network_passphrase.to_string(),
        });
        let failure = lock(&self.sign_failure).clone();
        self.sign_gates.pass().await;
        if let Some(err) = failure {
            return Err(err);
        }
        let mut signed = envelope.clone();
        signed
            .sign(network_passphrase, &self.keys)
            .map_err(|e| WalletError::Signing(e.to_string()))?;
        Ok(signed)
    }

    fn unavailable_message(&self) -> String {
        lock(&self.unavailable_message)
            .clone()
            .unwrap_or_else(|| tipjar_wallet_core::INSTALL_WALLET_MESSAGE.to_string())
    }
}
