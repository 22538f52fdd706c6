//! The network the tip jar is pinned to.
//!
//! Neither the network nor the destination can be changed at runtime.

/// The account every tip is paid to.
pub const TIP_JAR_ADDRESS: &str = "GCN6GYQUWVPBZ3YVBXKXEPDVJSNHDEE4C3UDVP66L6M54EEO7GDJQ3XI";

/// A ledger network: the passphrase that domain-separates signatures plus the
/// Horizon endpoint serving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Network {
    pub passphrase: &'static str,
    pub horizon_url: &'static str,
}

impl Network {
    /// The public test network.
    pub const TESTNET: Self = Self {
        passphrase: "Test SDF Network ; September 2015",
        horizon_url: "https://horizon-testnet.stellar.org",
    };

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        if *self == Self::TESTNET {
            "testnet"
        } else {
            "custom"
        }
    }
}
