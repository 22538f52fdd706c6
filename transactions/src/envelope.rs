//! Transactions, their signature payload, and the signed envelope.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tipjar_types::{KeyPair, PublicKey, Signature, Timestamp, TxHash};

use crate::error::TxError;
use crate::operation::{read_muxed_account, write_muxed_account, Operation};
use crate::xdr::{XdrReader, XdrWriter};
use crate::{MAX_OPERATIONS, MAX_SIGNATURES};

const ENVELOPE_TYPE_TX: i32 = 2;

const PRECOND_NONE: i32 = 0;
const PRECOND_TIME: i32 = 1;

const MEMO_NONE: i32 = 0;

/// Validity window. A zero `max_time` means "no upper bound".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_time: Timestamp,
    pub max_time: Timestamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preconditions {
    None,
    Time(TimeBounds),
}

/// An unsigned transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub source_account: PublicKey,
    /// Total fee in stroops for all operations.
    pub fee: u32,
    pub seq_num: i64,
    pub cond: Preconditions,
    pub operations: Vec<Operation>,
}

/// A signature plus the last four bytes of the signer's key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoratedSignature {
    pub hint: [u8; 4],
    pub signature: Signature,
}

/// The unit that is signed, passed to wallets and submitted to the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionEnvelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl Transaction {
    /// XDR encoding of the bare transaction.
    pub fn to_xdr(&self) -> Vec<u8> {
        let mut w = XdrWriter::new();
        self.write_xdr(&mut w);
        w.into_bytes()
    }

    /// The transaction hash on the network identified by `network_passphrase`:
    /// SHA-256(network_id || ENVELOPE_TYPE_TX || tx).
    pub fn hash(&self, network_passphrase: &str) -> TxHash {
        let network_id = tipjar_crypto::network_id(network_passphrase);
        let tagged = ENVELOPE_TYPE_TX.to_be_bytes();
        let tx = self.to_xdr();
        TxHash::new(tipjar_crypto::sha256_multi(&[&network_id, &tagged, &tx]))
    }

    fn write_xdr(&self, w: &mut XdrWriter) {
        write_muxed_account(w, &self.source_account);
        w.write_u32(self.fee);
        w.write_i64(self.seq_num);
        match self.cond {
            Preconditions::None => w.write_i32(PRECOND_NONE),
            Preconditions::Time(bounds) => {
                w.write_i32(PRECOND_TIME);
                w.write_u64(bounds.min_time.as_secs());
                w.write_u64(bounds.max_time.as_secs());
            }
        }
        w.write_i32(MEMO_NONE);
        w.write_u32(self.operations.len() as u32);
        for op in &self.operations {
            op.write_xdr(w);
        }
        // ext: v0
        w.write_i32(0);
    }

    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, TxError> {
        let source_account = read_muxed_account(r)?;
        let fee = r.read_u32()?;
        let seq_num = r.read_i64()?;
        let cond = match r.read_i32()? {
            PRECOND_NONE => Preconditions::None,
            PRECOND_TIME => Preconditions::Time(TimeBounds {
                min_time: Timestamp::new(r.read_u64()?),
                max_time: Timestamp::new(r.read_u64()?),
            }),
            value => {
                return Err(TxError::UnsupportedDiscriminant {
                    what: "preconditions",
                    value,
                })
            }
        };
        match r.read_i32()? {
            MEMO_NONE => {}
            value => return Err(TxError::UnsupportedDiscriminant { what: "memo", value }),
        }
        let count = r.read_len("operations", MAX_OPERATIONS)?;
        let operations = (0..count)
            .map(|_| Operation::read_xdr(r))
            .collect::<Result<Vec<_>, _>>()?;
        match r.read_i32()? {
            0 => {}
            value => {
                return Err(TxError::UnsupportedDiscriminant {
                    what: "transaction ext",
                    value,
                })
            }
        }
        Ok(Self {
            source_account,
            fee,
            seq_num,
            cond,
            operations,
        })
    }
}

impl TransactionEnvelope {
    /// Wrap a transaction with no signatures yet.
    pub fn unsigned(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: Vec::new(),
        }
    }

    /// Sign for `network_passphrase` and append the decorated signature.
    pub fn sign(&mut self, network_passphrase: &str, keys: &KeyPair) -> Result<(), TxError> {
        if self.signatures.len() >= MAX_SIGNATURES {
            return Err(TxError::LengthExceeded {
                what: "signatures",
                len: self.signatures.len() + 1,
                max: MAX_SIGNATURES,
            });
        }
        let hash = self.tx.hash(network_passphrase);
        let signature = tipjar_crypto::sign_hash(hash.as_bytes(), &keys.private);
        self.signatures.push(DecoratedSignature {
            hint: keys.public.hint(),
            signature,
        });
        Ok(())
    }

    /// Whether some attached signature is a valid signature by `key` on this network.
    pub fn is_signed_by(&self, network_passphrase: &str, key: &PublicKey) -> bool {
        let hash = self.tx.hash(network_passphrase);
        self.signatures.iter().any(|sig| {
            sig.hint == key.hint() && tipjar_crypto::verify_hash(hash.as_bytes(), &sig.signature, key)
        })
    }

    pub fn to_xdr(&self) -> Vec<u8> {
        let mut w = XdrWriter::new();
        w.write_i32(ENVELOPE_TYPE_TX);
        self.tx.write_xdr(&mut w);
        w.write_u32(self.signatures.len() as u32);
        for sig in &self.signatures {
            w.write_fixed(&sig.hint);
            w.write_var(sig.signature.as_bytes());
        }
        w.into_bytes()
    }

    pub fn from_xdr(bytes: &[u8]) -> Result<Self, TxError> {
        let mut r = XdrReader::new(bytes);
        match r.read_i32()? {
            ENVELOPE_TYPE_TX => {}
            value => {
                return Err(TxError::UnsupportedDiscriminant {
                    what: "envelope type",
                    value,
                })
            }
        }
        let tx = Transaction::read_xdr(&mut r)?;
        let count = r.read_len("signatures", MAX_SIGNATURES)?;
        let mut signatures = Vec::with_capacity(count);
        for _ in 0..count {
            let hint = r.read_fixed::<4>()?;
            let raw = r.read_var("signature", 64)?;
            let signature: [u8; 64] = raw.as_slice().try_into().map_err(|_| TxError::LengthExceeded {
                what: "signature",
                len: raw.len(),
                max: 64,
            })?;
            signatures.push(DecoratedSignature {
                hint,
                signature: Signature(signature),
            });
        }
        r.finish()?;
        Ok(Self { tx, signatures })
    }

    pub fn to_xdr_base64(&self) -> String {
        STANDARD.encode(self.to_xdr())
    }

    pub fn from_xdr_base64(encoded: &str) -> Result<Self, TxError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| TxError::Base64(e.to_string()))?;
        Self::from_xdr(&bytes)
    }
}
