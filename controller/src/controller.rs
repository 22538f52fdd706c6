//! The session controller.
//!
//! Locking: the session mutex is held only for short reads and writes and is
//! never held across a wallet or ledger call. Work that spans calls captures
//! the session epoch when it starts and writes back only if the epoch is
//! unchanged.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use tipjar_ledger::LedgerProvider;
use tipjar_types::{AccountAddress, Amount, Network, Timestamp};
use tipjar_wallet_core::{WalletError, WalletProvider, SIGN_PROMPT_MESSAGE};

use crate::error::{TipError, TipRejection};
use crate::session::{Balance, Session, SessionPhase, SessionView, TipSelection};
use crate::tip::{build_tip, parse_tip_amount, TipReceipt};

pub const NO_ADDRESS_MESSAGE: &str = "Could not retrieve public key.";
pub const CONNECT_FAILED_MESSAGE: &str = "Connection rejected or failed.";
pub const CONNECTED_MESSAGE: &str = "Wallet connected successfully!";
pub const DISCONNECTED_MESSAGE: &str = "Wallet disconnected.";
/// Default signing status; the wallet supplies its own through
/// [`WalletProvider::signing_message`].
pub const BUILDING_MESSAGE: &str = SIGN_PROMPT_MESSAGE;
pub const SUBMITTING_MESSAGE: &str = "Submitting to Stellar network...";

/// Owns one visitor session and drives the wallet and ledger on its behalf.
pub struct TipJarController<W, L> {
    wallet: W,
    ledger: L,
    network: Network,
    session: Mutex<Session>,
}

impl<W: WalletProvider, L: LedgerProvider> TipJarController<W, L> {
    /// A controller for the test network with a fresh, disconnected session.
    pub fn new(wallet: W, ledger: L) -> Self {
        Self {
            wallet,
            ledger,
            network: Network::TESTNET,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub async fn snapshot(&self) -> SessionView {
        self.session.lock().await.view()
    }

    /// Connect the wallet and load the account's balance.
    ///
    /// On failure the session returns to the phase it had before: connected
    /// if an address was already held, disconnected otherwise.
    pub async fn connect(&self) -> Result<AccountAddress, TipError> {
        let (epoch, previous) = {
            let mut s = self.session.lock().await;
            if matches!(s.phase, SessionPhase::Connecting | SessionPhase::Submitting) {
                return Err(TipError::Busy);
            }
            let previous = if s.address.is_some() {
                SessionPhase::Connected
            } else {
                SessionPhase::Disconnected
            };
            s.phase = SessionPhase::Connecting;
            (s.epoch, previous)
        };

        if !self.wallet.is_available().await {
            info!("wallet unavailable");
            let message = self.wallet.unavailable_message();
            self.fail_connect(epoch, previous, message).await;
            return Err(WalletError::Unavailable.into());
        }

        let address = match self.wallet.request_address().await {
            Ok(address) => address,
            Err(e) => {
                warn!(error = %e, "wallet did not provide an address");
                let message = match e {
                    WalletError::NoAddress => NO_ADDRESS_MESSAGE,
                    _ => CONNECT_FAILED_MESSAGE,
                };
                self.fail_connect(epoch, previous, message.to_string()).await;
                return Err(e.into());
            }
        };

        {
            let mut s = self.session.lock().await;
            if s.epoch != epoch {
                debug!("connect superseded by disconnect");
                return Err(TipError::Superseded);
            }
            if s.address.as_ref() != Some(&address) {
                s.balance = None;
            }
            s.address = Some(address.clone());
            s.status = CONNECTED_MESSAGE.to_string();
            s.phase = SessionPhase::Connected;
        }
        info!(address = %address, "wallet connected");

        self.refresh_balance(&address).await;
        Ok(address)
    }

    async fn fail_connect(&self, epoch: u64, previous: SessionPhase, message: String) {
        let mut s = self.session.lock().await;
        if s.epoch == epoch {
            s.status = message;
            s.phase = previous;
        }
    }

    /// Forget the connected account. Safe to call at any time, any number of
    /// times; anything still in flight will not write to the session.
    pub async fn disconnect(&self) {
        let mut s = self.session.lock().await;
        s.epoch += 1;
        s.clear();
        s.status = DISCONNECTED_MESSAGE.to_string();
        info!(epoch = s.epoch, "wallet disconnected");
    }

    /// Look up the native balance of `address`.
    ///
    /// Never fails: any lookup error resolves to [`Balance::Unfunded`]. The
    /// result is stored only if this is the most recently started refresh and
    /// `address` is still the connected account.
    pub async fn refresh_balance(&self, address: &AccountAddress) -> Balance {
        let (ticket, epoch) = {
            let mut s = self.session.lock().await;
            s.balance_ticket += 1;
            (s.balance_ticket, s.epoch)
        };

        let balance = match self.ledger.load_account(address).await {
            Ok(account) => Balance::Native(account.native_balance().unwrap_or(Amount::ZERO)),
            Err(e) => {
                debug!(address = %address, error = %e, "balance lookup failed");
                Balance::Unfunded
            }
        };

        let mut s = self.session.lock().await;
        if s.epoch == epoch && s.balance_ticket == ticket && s.address.as_ref() == Some(address) {
            s.balance = Some(balance);
            debug!(address = %address, balance = %balance, "balance updated");
        } else {
            debug!(ticket, "dropping stale balance");
        }
        balance
    }

    /// Pay `amount_text` XLM to the tip jar.
    ///
    /// Connection, amount, and single-flight checks run first and never
    /// reach the wallet or the ledger. After a successful submission the
    /// balance is refreshed once.
    pub async fn send_tip(&self, amount_text: &str) -> Result<TipReceipt, TipError> {
        let (address, amount, epoch) = {
            let mut s = self.session.lock().await;
            match admit(&s, amount_text) {
                Ok((address, amount)) => {
                    s.phase = SessionPhase::Submitting;
                    s.status = self.wallet.signing_message();
                    (address, amount, s.epoch)
                }
                Err(rejection) => {
                    debug!(%rejection, "tip rejected");
                    s.status = rejection.to_string();
                    return Err(rejection.into());
                }
            }
        };
        info!(address = %address, amount = %amount, "sending tip");

        let outcome = self.submit_tip(&address, amount, epoch).await;

        let current = {
            let mut s = self.session.lock().await;
            if s.epoch == epoch {
                match &outcome {
                    Ok(receipt) => {
                        s.status = format!(
                            "Success! Sent {} XLM — Hash: {}...",
                            receipt.amount,
                            receipt.hash.prefix(10)
                        );
                        s.custom_amount.clear();
                        s.selection = None;
                    }
                    Err(e) => s.status = format!("Transaction failed: {}", e.reason()),
                }
                s.phase = SessionPhase::Connected;
                true
            } else {
                false
            }
        };

        match &outcome {
            Ok(receipt) => {
                info!(hash = %receipt.hash, amount = %receipt.amount, "tip accepted");
                if current {
                    self.refresh_balance(&address).await;
                }
            }
            Err(e) => warn!(reason = %e.reason(), "tip failed"),
        }
        outcome
    }

    async fn submit_tip(
        &self,
        address: &AccountAddress,
        amount: Amount,
        epoch: u64,
    ) -> Result<TipReceipt, TipError> {
        let account = self.ledger.load_account(address).await?;
        let base_fee = self.ledger.fetch_base_fee().await?;
        let unsigned = build_tip(&account, base_fee, amount, Timestamp::now())?;
        debug!(seq = unsigned.tx.seq_num, fee = unsigned.tx.fee, "tip transaction built");

        let signed = self.wallet.sign(&unsigned, self.network.passphrase).await?;
        if signed.tx != unsigned.tx {
            return Err(TipError::EnvelopeMismatch);
        }

        {
            let mut s = self.session.lock().await;
            if s.epoch != epoch {
                return Err(TipError::Superseded);
            }
            s.status = SUBMITTING_MESSAGE.to_string();
        }

        let result = self.ledger.submit(&signed).await?;
        Ok(TipReceipt {
            hash: result.hash,
            amount,
        })
    }

    /// Highlight a preset, clear the custom input, and send the preset amount.
    pub async fn select_preset(&self, amount: Amount) -> Result<TipReceipt, TipError> {
        {
            let mut s = self.session.lock().await;
            s.selection = Some(TipSelection::Preset(amount));
            s.custom_amount.clear();
        }
        self.send_tip(&amount.to_string()).await
    }

    /// Store the custom amount text as typed.
    pub async fn set_custom_amount(&self, text: impl Into<String>) {
        let mut s = self.session.lock().await;
        s.custom_amount = text.into();
        s.selection = Some(TipSelection::Custom);
    }

    /// Send whatever is in the custom amount input.
    pub async fn send_custom(&self) -> Result<TipReceipt, TipError> {
        let text = {
            let mut s = self.session.lock().await;
            s.selection = Some(TipSelection::Custom);
            s.custom_amount.clone()
        };
        self.send_tip(&text).await
    }
}

/// Preconditions for a send, in the order the visitor should hear about them.
fn admit(s: &Session, amount_text: &str) -> Result<(AccountAddress, Amount), TipRejection> {
    let address = match (&s.address, s.phase) {
        (Some(address), phase) if phase != SessionPhase::Disconnected => address.clone(),
        _ => return Err(TipRejection::NotConnected),
    };
    let amount = parse_tip_amount(amount_text)?;
    match s.phase {
        SessionPhase::Submitting => Err(TipRejection::AlreadySubmitting),
        SessionPhase::Connecting => Err(TipRejection::WalletBusy),
        _ => Ok((address, amount)),
    }
}
