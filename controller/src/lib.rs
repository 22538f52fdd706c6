//! Wallet session controller for the tip jar.
//!
//! The controller owns one [`Session`] and sequences the calls a visitor's
//! actions trigger:
//! - connect: wallet availability, then the wallet's address, then a balance refresh
//! - refresh: account lookup on the ledger
//! - send: account + base fee, build, wallet signature, submission, balance refresh
//!
//! Every outcome is reflected in the session's status line; nothing here is
//! fatal to the UI.

pub mod controller;
pub mod error;
pub mod session;
pub mod tip;

pub use controller::TipJarController;
pub use error::{TipError, TipRejection};
pub use session::{Balance, Session, SessionPhase, SessionView, TipSelection};
pub use tip::{build_tip, parse_tip_amount, TipReceipt, MIN_TIP, PRESETS, TX_TIMEOUT_SECS};
