//! Stellar account address type (`G...` StrKey).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// A Stellar account address: a 56-character StrKey starting with `G`.
///
/// Construction only checks the shape (prefix, length, base32 alphabet). The
/// checksum is verified by `tipjar_crypto::decode_address`, which is what every
/// transaction-building path goes through.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The version character of every account address.
    pub const PREFIX: char = 'G';

    /// Length of an encoded account StrKey.
    pub const LEN: usize = 56;

    /// Wrap an already-encoded StrKey.
    ///
    /// # Panics
    /// Panics if the string is not shaped like a `G...` StrKey.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(Self::is_well_formed(&s), "address must be a G... StrKey");
        Self(s)
    }

    /// Parse an address, rejecting anything that is not shaped like a `G...` StrKey.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if !Self::is_well_formed(&s) {
            return Err(TypesError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `GABCD...VWXYZ` form used wherever the full key would be noise.
    pub fn truncated(&self) -> String {
        let s = self.0.as_str();
        format!("{}...{}", &s[..5], &s[s.len() - 5..])
    }

    fn is_well_formed(s: &str) -> bool {
        s.len() == Self::LEN
            && s.starts_with(Self::PREFIX)
            && s.bytes().all(|b| matches!(b, b'A'..=b'Z' | b'2'..=b'7'))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AccountAddress> for String {
    fn from(address: AccountAddress) -> Self {
        address.0
    }
}

impl std::str::FromStr for AccountAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
