//! Nullable infrastructure for deterministic testing.
//!
//! The controller talks to the outside world through two traits,
//! `WalletProvider` and `LedgerProvider`. This crate provides stand-ins that:
//! - return scripted answers
//! - record every call for later assertions
//! - can hold a call open until the test releases it
//! - never touch the network
//!
//! Usage: build the controller with [`NullWallet`] and [`NullLedger`] in tests.

mod gate;
pub mod ledger;
pub mod wallet;

pub use gate::Gate;
pub use ledger::{LedgerCall, NullLedger};
pub use wallet::{NullWallet, WalletCall};
