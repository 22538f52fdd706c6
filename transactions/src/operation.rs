//! Operations carried by a transaction. Payment is the only one the tip jar sends.

use tipjar_types::{Amount, PublicKey};

use crate::error::TxError;
use crate::xdr::{XdrReader, XdrWriter};

const ASSET_TYPE_NATIVE: i32 = 0;
const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;

const OPERATION_TYPE_PAYMENT: i32 = 1;

const PUBLIC_KEY_TYPE_ED25519: i32 = 0;
const KEY_TYPE_ED25519: i32 = 0;

/// An asset on the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Asset {
    /// The ledger's base currency (XLM).
    Native,
    /// Issued asset with a 1-4 character code, NUL padded.
    CreditAlphanum4 { code: [u8; 4], issuer: PublicKey },
    /// Issued asset with a 5-12 character code, NUL padded.
    CreditAlphanum12 { code: [u8; 12], issuer: PublicKey },
}

/// Send `amount` of `asset` to `destination`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentOp {
    pub destination: PublicKey,
    pub asset: Asset,
    pub amount: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationBody {
    Payment(PaymentOp),
}

/// One operation. `source_account: None` means "the transaction's source".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    pub source_account: Option<PublicKey>,
    pub body: OperationBody,
}

impl Operation {
    /// A payment from the transaction's source account.
    pub fn payment(destination: PublicKey, asset: Asset, amount: Amount) -> Result<Self, TxError> {
        if !amount.is_positive() {
            return Err(TxError::NonPositiveAmount);
        }
        Ok(Self {
            source_account: None,
            body: OperationBody::Payment(PaymentOp {
                destination,
                asset,
                amount,
            }),
        })
    }

    pub(crate) fn write_xdr(&self, w: &mut XdrWriter) {
        match &self.source_account {
            Some(source) => {
                w.write_bool(true);
                write_muxed_account(w, source);
            }
            None => w.write_bool(false),
        }
        match &self.body {
            OperationBody::Payment(op) => {
                w.write_i32(OPERATION_TYPE_PAYMENT);
                write_muxed_account(w, &op.destination);
                op.asset.write_xdr(w);
                w.write_i64(op.amount.stroops());
            }
        }
    }

    pub(crate) fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, TxError> {
        let source_account = if r.read_bool()? {
            Some(read_muxed_account(r)?)
        } else {
            None
        };
        let body = match r.read_i32()? {
            OPERATION_TYPE_PAYMENT => {
                let destination = read_muxed_account(r)?;
                let asset = Asset::read_xdr(r)?;
                let amount = Amount::from_stroops(r.read_i64()?);
                OperationBody::Payment(PaymentOp {
                    destination,
                    asset,
                    amount,
                })
            }
            value => {
                return Err(TxError::UnsupportedDiscriminant {
                    what: "operation type",
                    value,
                })
            }
        };
        Ok(Self {
            source_account,
            body,
        })
    }
}

impl Asset {
    fn write_xdr(&self, w: &mut XdrWriter) {
        match self {
            Self::Native => w.write_i32(ASSET_TYPE_NATIVE),
            Self::CreditAlphanum4 { code, issuer } => {
                w.write_i32(ASSET_TYPE_CREDIT_ALPHANUM4);
                w.write_fixed(code);
                write_account_id(w, issuer);
            }
            Self::CreditAlphanum12 { code, issuer } => {
                w.write_i32(ASSET_TYPE_CREDIT_ALPHANUM12);
                w.write_fixed(code);
                write_account_id(w, issuer);
            }
        }
    }

    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, TxError> {
        match r.read_i32()? {
            ASSET_TYPE_NATIVE => Ok(Self::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => {
                let code = r.read_fixed::<4>()?;
                let issuer = read_account_id(r)?;
                Ok(Self::CreditAlphanum4 { code, issuer })
            }
            ASSET_TYPE_CREDIT_ALPHANUM12 => {
                let code = r.read_fixed::<12>()?;
                let issuer = read_account_id(r)?;
                Ok(Self::CreditAlphanum12 { code, issuer })
            }
            value => Err(TxError::UnsupportedDiscriminant {
                what: "asset type",
                value,
            }),
        }
    }
}

/// MuxedAccount restricted to the plain ed25519 arm.
pub(crate) fn write_muxed_account(w: &mut XdrWriter, key: &PublicKey) {
    w.write_i32(KEY_TYPE_ED25519);
    w.write_fixed(key.as_bytes());
}

pub(crate) fn read_muxed_account(r: &mut XdrReader<'_>) -> Result<PublicKey, TxError> {
    match r.read_i32()? {
        KEY_TYPE_ED25519 => Ok(PublicKey(r.read_fixed::<32>()?)),
        value => Err(TxError::UnsupportedDiscriminant {
            what: "muxed account",
            value,
        }),
    }
}

fn write_account_id(w: &mut XdrWriter, key: &PublicKey) {
    w.write_i32(PUBLIC_KEY_TYPE_ED25519);
    w.write_fixed(key.as_bytes());
}

fn read_account_id(r: &mut XdrReader<'_>) -> Result<PublicKey, TxError> {
    match r.read_i32()? {
        PUBLIC_KEY_TYPE_ED25519 => Ok(PublicKey(r.read_fixed::<32>()?)),
        value => Err(TxError::UnsupportedDiscriminant {
            what: "account id",
            value,
        }),
    }
}
