//! Fundamental types for the tip jar.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, fixed-point amounts, transaction hashes, keys, timestamps and
//! the constants of the one network the tip jar talks to.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod keys;
pub mod network;
pub mod time;

pub use address::AccountAddress;
pub use amount::Amount;
pub use error::TypesError;
pub use hash::{TxHash, TxReference};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::{Network, TIP_JAR_ADDRESS};
pub use time::Timestamp;
