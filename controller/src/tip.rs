//! Tip amounts and the payment transaction that carries them.

use tipjar_crypto::public_key_of;
use tipjar_ledger::AccountState;
use tipjar_transactions::{Asset, Operation, TransactionBuilder, TransactionEnvelope};
use tipjar_types::{AccountAddress, Amount, Timestamp, TxReference, TypesError, TIP_JAR_ADDRESS};

use crate::error::{TipError, TipRejection};

/// Smallest tip the ledger can represent: one stroop.
pub const MIN_TIP: Amount = Amount::ONE_STROOP;

/// One-click tip amounts, in whole XLM.
pub const PRESETS: [Amount; 2] = [Amount::from_units(5), Amount::from_units(10)];

/// Seconds a built transaction stays valid.
pub const TX_TIMEOUT_SECS: u64 = 30;

/// A submitted tip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TipReceipt {
    pub hash: TxReference,
    pub amount: Amount,
}

/// Validate the visitor's amount text.
///
/// Zero, negative, and unparseable input is [`TipRejection::InvalidAmount`];
/// a positive value below one stroop is [`TipRejection::BelowMinimum`].
pub fn parse_tip_amount(text: &str) -> Result<Amount, TipRejection> {
    if text.trim_start().starts_with('-') {
        return Err(TipRejection::InvalidAmount);
    }
    match Amount::parse_decimal(text) {
        Ok(amount) if amount >= MIN_TIP => Ok(amount),
        Ok(amount) if amount.is_positive() => Err(TipRejection::BelowMinimum),
        Ok(_) => Err(TipRejection::InvalidAmount),
        Err(TypesError::BelowStroop(_)) => Err(TipRejection::BelowMinimum),
        Err(_) => Err(TipRejection::InvalidAmount),
    }
}

/// Build the unsigned one-payment envelope sending `amount` XLM from `source`
/// to the tip jar.
pub fn build_tip(
    source: &AccountState,
    base_fee: u32,
    amount: Amount,
    now: Timestamp,
) -> Result<TransactionEnvelope, TipError> {
    let source_key = public_key_of(&source.address)
        .ok_or_else(|| TipError::InvalidAccount(source.address.to_string()))?;
    let jar = AccountAddress::parse(TIP_JAR_ADDRESS)
        .ok()
        .and_then(|a| public_key_of(&a))
        .ok_or_else(|| TipError::InvalidAccount(TIP_JAR_ADDRESS.to_string()))?;

    let tx = TransactionBuilder::new(source_key, source.sequence, base_fee)
        .add_operation(Operation::payment(jar, Asset::Native, amount)?)
        .set_timeout(TX_TIMEOUT_SECS)
        .build_at(now)?;
    Ok(TransactionEnvelope::unsigned(tx))
}
