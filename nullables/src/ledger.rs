//! Nullable ledger: an in-memory account table plus a submission log.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use tipjar_ledger::{
    AccountState, BalanceAsset, BalanceLine, LedgerError, LedgerProvider, SubmitResult,
    DEFAULT_BASE_FEE,
};
use tipjar_transactions::TransactionEnvelope;
use tipjar_types::{AccountAddress, Amount, Network};

use crate::gate::{lock, Gate, GateQueue};

/// One recorded call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerCall {
    LoadAccount(AccountAddress),
    FetchBaseFee,
    Submit(TransactionEnvelope),
}

/// A ledger that answers from memory.
///
/// Unknown accounts load as [`LedgerError::AccountNotFound`]. Submissions are
/// accepted with the envelope's testnet hash unless an outcome was queued.
pub struct NullLedger {
    accounts: Mutex<HashMap<AccountAddress, AccountState>>,
    load_failure: Mutex<Option<LedgerError>>,
    base_fee: Mutex<Result<u32, LedgerError>>,
    submit_outcomes: Mutex<VecDeque<Result<SubmitResult, LedgerError>>>,
    calls: Mutex<Vec<LedgerCall>>,
    load_gates: GateQueue,
    submit_gates: GateQueue,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            load_failure: Mutex::new(None),
            base_fee: Mutex::new(Ok(DEFAULT_BASE_FEE)),
            submit_outcomes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            load_gates: GateQueue::default(),
            submit_gates: GateQueue::default(),
        }
    }

    /// Create or replace an account holding `native` XLM at `sequence`.
    pub fn fund(&self, address: &AccountAddress, native: Amount, sequence: i64) {
        self.set_account(AccountState {
            address: address.clone(),
            sequence,
            balances: vec![BalanceLine {
                asset: BalanceAsset::Native,
                balance: native,
            }],
        });
    }

    pub fn set_account(&self, state: AccountState) {
        lock(&self.accounts).insert(state.address.clone(), state);
    }

    /// Make every subsequent `load_account` fail with `err`.
    pub fn fail_loads(&self, err: LedgerError) {
        *lock(&self.load_failure) = Some(err);
    }

    pub fn set_base_fee(&self, fee: Result<u32, LedgerError>) {
        *lock(&self.base_fee) = fee;
    }

    /// Queue the outcome of the next submission.
    pub fn push_submit_outcome(&self, outcome: Result<SubmitResult, LedgerError>) {
        lock(&self.submit_outcomes).push_back(outcome);
    }

    /// Hold the next `load_account` open until the returned gate is released.
    /// The answer is taken when the call starts, not when it is released.
    pub fn hold_next_load(&self) -> Gate {
        self.load_gates.push()
    }

    /// Hold the next `submit` open until the returned gate is released.
    pub fn hold_next_submit(&self) -> Gate {
        self.submit_gates.push()
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        lock(&self.calls).clone()
    }

    pub fn load_count(&self) -> usize {
        self.count(|c| matches!(c, LedgerCall::LoadAccount(_)))
    }

    pub fn submitted(&self) -> Vec<TransactionEnvelope> {
        lock(&self.calls)
            .iter()
            .filter_map(|c| match c {
                LedgerCall::Submit(env) => Some(env.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of calls of any kind.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn count(&self, pred: impl Fn(&LedgerCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: LedgerCall) {
        lock(&self.calls).push(call);
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerProvider for NullLedger {
    async fn load_account(&self, address: &AccountAddress) -> Result<AccountState, LedgerError> {
        self.record(LedgerCall::LoadAccount(address.clone()));
        let answer = match lock(&self.load_failure).clone() {
            Some(err) => Err(err),
            None => lock(&self.accounts)
                .get(address)
                .cloned()
                .ok_or_else(|| LedgerError::AccountNotFound(address.to_string())),
        };
        self.load_gates.pass().await;
        answer
    }

    async fn fetch_base_fee(&self) -> Result<u32, LedgerError> {
        self.record(LedgerCall::FetchBaseFee);
        lock(&self.base_fee).clone()
    }

    async fn submit(&self, envelope: &TransactionEnvelope) -> Result<SubmitResult, LedgerError> {
        self.record(LedgerCall::Submit(envelope.clone()));
        let queued = lock(&self.submit_outcomes).pop_front();
        self.submit_gates.pass().await;
        queued.unwrap_or_else(|| {
            Ok(SubmitResult {
                hash: envelope.tx.hash(Network::TESTNET.passphrase).into(),
                ledger: Some(1),
            })
        })
    }
}
