//! Account snapshots and submission results as the controller sees them.

use tipjar_types::{AccountAddress, Amount, TxReference};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BalanceAsset {
    Native,
    Credit { code: String, issuer: String },
    LiquidityPoolShares,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceLine {
    pub asset: BalanceAsset,
    pub balance: Amount,
}

/// A loaded account: its current sequence number and balance lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountState {
    pub address: AccountAddress,
    pub sequence: i64,
    pub balances: Vec<BalanceLine>,
}

impl AccountState {
    /// The native (XLM) balance line, if the account holds one.
    pub fn native_balance(&self) -> Option<Amount> {
        self.balances
            .iter()
            .find(|line| line.asset == BalanceAsset::Native)
            .map(|line| line.balance)
    }
}

/// An accepted submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitResult {
    /// Reference reported by the server, usually the 64-character hex hash.
    pub hash: TxReference,
    /// Ledger that included the transaction, when reported.
    pub ledger: Option<u32>,
}
