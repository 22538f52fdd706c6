//! Payment transactions for the tip jar.
//!
//! Only the part of the ledger's transaction format the tip jar needs is modelled:
//! - v1 transaction envelopes with ed25519 source accounts
//! - time-bound preconditions and no memo
//! - payment operations in the native asset or a 4/12-character credit asset
//! - decorated ed25519 signatures
//!
//! Envelopes travel as base64 XDR. [`TransactionBuilder`] fills in sequence,
//! fee and expiry the same way for every caller.

pub mod builder;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod xdr;

pub use builder::TransactionBuilder;
pub use envelope::{DecoratedSignature, Preconditions, TimeBounds, Transaction, TransactionEnvelope};
pub use error::TxError;
pub use operation::{Asset, Operation, OperationBody, PaymentOp};

/// Hard protocol limit on operations per transaction.
pub const MAX_OPERATIONS: usize = 100;

/// Hard protocol limit on signatures per envelope.
pub const MAX_SIGNATURES: usize = 20;
