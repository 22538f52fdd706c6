//! Transaction builder: sequence, fee and expiry in one place.

use tipjar_types::{PublicKey, Timestamp};

use crate::envelope::{Preconditions, TimeBounds, Transaction};
use crate::error::TxError;
use crate::operation::Operation;
use crate::MAX_OPERATIONS;

/// Builds a [`Transaction`] for a source account.
///
/// The sequence number is the account's current sequence plus one, the fee is
/// `base_fee` per operation, and a timeout must be set explicitly (use
/// `set_timeout(0)` for no upper time bound).
pub struct TransactionBuilder {
    source: PublicKey,
    current_sequence: i64,
    base_fee: u32,
    operations: Vec<Operation>,
    timeout_secs: Option<u64>,
}

impl TransactionBuilder {
    pub fn new(source: PublicKey, current_sequence: i64, base_fee: u32) -> Self {
        Self {
            source,
            current_sequence,
            base_fee,
            operations: Vec::new(),
            timeout_secs: None,
        }
    }

    pub fn add_operation(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Valid for `secs` seconds from build time; 0 disables the upper bound.
    pub fn set_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Build with the wall clock as "now".
    pub fn build(self) -> Result<Transaction, TxError> {
        self.build_at(Timestamp::now())
    }

    /// Build with an explicit "now", for deterministic envelopes.
    pub fn build_at(self, now: Timestamp) -> Result<Transaction, TxError> {
        if self.operations.is_empty() {
            return Err(TxError::NoOperations);
        }
        if self.operations.len() > MAX_OPERATIONS {
            return Err(TxError::TooManyOperations(self.operations.len()));
        }
        let timeout = self.timeout_secs.ok_or(TxError::MissingTimeout)?;

        let fee = u32::try_from(self.operations.len())
            .ok()
            .and_then(|n| self.base_fee.checked_mul(n))
            .ok_or(TxError::FeeOverflow {
                base_fee: self.base_fee,
                operations: self.operations.len(),
            })?;

        let seq_num = self
            .current_sequence
            .checked_add(1)
            .ok_or(TxError::SequenceOverflow(self.current_sequence))?;

        let max_time = if timeout == 0 {
            Timestamp::EPOCH
        } else {
            now.plus_secs(timeout)
        };

        Ok(Transaction {
            source_account: self.source,
            fee,
            seq_num,
            cond: Preconditions::Time(TimeBounds {
                min_time: Timestamp::EPOCH,
                max_time,
            }),
            operations: self.operations,
        })
    }
}
