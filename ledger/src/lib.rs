//! Ledger access for the tip jar.
//!
//! The controller only sees [`LedgerProvider`]. [`HorizonClient`] is the
//! production implementation; test doubles live in `tipjar-nullables`.

pub mod account;
pub mod error;
pub mod horizon;
pub mod problem;
pub mod provider;

pub use account::{AccountState, BalanceAsset, BalanceLine, SubmitResult};
pub use error::LedgerError;
pub use horizon::{HorizonClient, DEFAULT_BASE_FEE};
pub use provider::LedgerProvider;
