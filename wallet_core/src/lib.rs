//! Wallet side of the tip jar.
//!
//! - [`WalletProvider`]: what the controller needs from a wallet
//! - [`keystore`]: Argon2id + AES-256-GCM encrypted key files
//! - [`KeystoreWallet`]: a local ed25519 signer backed by a keystore or secret seed

pub mod error;
pub mod keys;
pub mod keystore;
pub mod provider;
pub mod wallet;

pub use error::WalletError;
pub use keys::{keypair_from_secret_seed, secret_seed_of};
pub use keystore::{
    decrypt_keystore, encrypt_keystore, load_keystore, save_keystore, KeystoreFile,
};
pub use provider::{WalletProvider, INSTALL_WALLET_MESSAGE, SIGN_PROMPT_MESSAGE};
pub use wallet::{KeystoreWallet, LOCAL_SIGNING_MESSAGE, NO_SIGNING_KEY_MESSAGE};
