//! Fixed-point asset amounts.
//!
//! Ledger amounts have exactly seven decimal places. They are stored as a signed
//! count of stroops (1 unit = 10^7 stroops), the same integer the ledger puts on
//! the wire, so no floating point is involved anywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Number of decimal places carried by every ledger amount.
pub const DECIMALS: usize = 7;

/// Stroops per whole unit of an asset.
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// An asset amount in stroops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Self(0);

    /// The smallest representable positive amount: 0.0000001.
    pub const ONE_STROOP: Self = Self(1);

    pub const fn from_stroops(stroops: i64) -> Self {
        Self(stroops)
    }

    /// Whole units, e.g. `Amount::from_units(5)` is 5.0000000.
    pub const fn from_units(units: i64) -> Self {
        Self(units * STROOPS_PER_UNIT)
    }

    pub fn stroops(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parse a plain decimal string (`"5"`, `"0.5"`, `".25"`, `"+10."`).
    ///
    /// Digits past the seventh decimal place are rounded half-up. A non-zero value
    /// that is smaller than one stroop is reported as [`TypesError::BelowStroop`]
    /// instead of silently rounding to zero. Exponents and signs other than a
    /// leading `+` or `-` are rejected.
    pub fn parse_decimal(input: &str) -> Result<Self, TypesError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyAmount);
        }

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(TypesError::MalformedAmount(input.to_string()));
        }

        let overflow = || TypesError::AmountOverflow(input.to_string());

        let mut stroops: i64 = 0;
        for b in int_part.bytes() {
            stroops = stroops
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(b - b'0')))
                .ok_or_else(overflow)?;
        }
        stroops = stroops.checked_mul(STROOPS_PER_UNIT).ok_or_else(overflow)?;

        let frac = frac_part.as_bytes();
        let mut scale = STROOPS_PER_UNIT / 10;
        for &b in frac.iter().take(DECIMALS) {
            stroops = stroops
                .checked_add(i64::from(b - b'0') * scale)
                .ok_or_else(overflow)?;
            scale /= 10;
        }

        let excess = frac.get(DECIMALS..).unwrap_or(&[]);
        if stroops == 0 && excess.iter().any(|&b| b != b'0') {
            return Err(TypesError::BelowStroop(input.to_string()));
        }
        if excess.first().is_some_and(|&b| b >= b'5') {
            stroops = stroops.checked_add(1).ok_or_else(overflow)?;
        }

        Ok(Self(if negative { -stroops } else { stroops }))
    }

    /// Render with exactly seven decimal places, the form the ledger expects.
    pub fn to_fixed(&self) -> String {
        let (sign, whole, frac) = self.split();
        format!("{sign}{whole}.{frac:07}")
    }

    /// Render with two decimal places, rounding half away from zero.
    pub fn to_fixed_2(&self) -> String {
        let cents_unit = (STROOPS_PER_UNIT / 100) as u64;
        let abs = self.0.unsigned_abs();
        let cents = (abs + cents_unit / 2) / cents_unit;
        let sign = if self.0 < 0 && cents != 0 { "-" } else { "" };
        format!("{sign}{}.{:02}", cents / 100, cents % 100)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    fn split(&self) -> (&'static str, u64, u64) {
        let abs = self.0.unsigned_abs();
        let unit = STROOPS_PER_UNIT as u64;
        let sign = if self.0 < 0 { "-" } else { "" };
        (sign, abs / unit, abs % unit)
    }
}

/// Shortest decimal form: `5`, `0.5`, `0.0000001`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, whole, frac) = self.split();
        if frac == 0 {
            return write!(f, "{sign}{whole}");
        }
        let digits = format!("{frac:07}");
        write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Amount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_decimal(s)
    }
}
