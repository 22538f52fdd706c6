//! Session state owned by the controller.

use std::fmt;

use serde::{Serialize, Serializer};

use tipjar_types::{AccountAddress, Amount};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Submitting,
}

/// The connected account's native balance as last resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Balance {
    Native(Amount),
    /// The lookup failed; on testnet that almost always means the account
    /// has never been funded.
    Unfunded,
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(amount) => f.write_str(&amount.to_fixed_2()),
            Self::Unfunded => f.write_str("0.00 (not funded)"),
        }
    }
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which tip control is highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipSelection {
    Preset(Amount),
    Custom,
}

/// Mutable session state. Lives behind the controller's mutex.
#[derive(Debug, Default)]
pub struct Session {
    pub address: Option<AccountAddress>,
    pub balance: Option<Balance>,
    pub status: String,
    pub custom_amount: String,
    pub selection: Option<TipSelection>,
    pub phase: SessionPhase,
    /// Bumped on every disconnect. Work started under an older epoch must
    /// not write to the session.
    pub(crate) epoch: u64,
    /// Last balance ticket handed out. Only the holder of this ticket may
    /// write `balance`.
    pub(crate) balance_ticket: u64,
}

impl Session {
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            address: self.address.clone(),
            balance: self.balance,
            status: self.status.clone(),
            custom_amount: self.custom_amount.clone(),
            selection: self.selection,
        }
    }

    /// Forget the account and everything derived from it.
    pub(crate) fn clear(&mut self) {
        self.address = None;
        self.balance = None;
        self.custom_amount.clear();
        self.selection = None;
        self.phase = SessionPhase::Disconnected;
    }
}

/// A read-only copy of the session for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub address: Option<AccountAddress>,
    pub balance: Option<Balance>,
    pub status: String,
    pub custom_amount: String,
    pub selection: Option<TipSelection>,
}

impl SessionView {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// `GABCD...VWXYZ`, when connected.
    pub fn address_short(&self) -> Option<String> {
        self.address.as_ref().map(AccountAddress::truncated)
    }

    /// Balance text; `"Loading..."` until the first refresh lands.
    pub fn balance_text(&self) -> String {
        self.balance
            .map(|b| b.to_string())
            .unwrap_or_else(|| "Loading...".to_string())
    }

    /// Whether the custom send control should be enabled: the input is
    /// non-empty and reads as a positive number.
    pub fn custom_amount_sendable(&self) -> bool {
        Amount::parse_decimal(&self.custom_amount).is_ok_and(|a| a.is_positive())
    }
}
