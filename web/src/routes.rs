//! Router and request handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{middleware, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::debug;

use tipjar_controller::{SessionView, TipJarController, PRESETS};
use tipjar_ledger::LedgerProvider;
use tipjar_types::{Amount, TIP_JAR_ADDRESS};
use tipjar_wallet_core::WalletProvider;

use crate::error::WebError;
use crate::{guard, page};

type Shared<W, L> = Arc<TipJarController<W, L>>;

/// Build the application router around a shared controller.
pub fn router<W, L>(controller: Shared<W, L>) -> Router
where
    W: WalletProvider + 'static,
    L: LedgerProvider + 'static,
{
    Router::new()
        .route("/", get(index::<W, L>))
        .route("/connect", post(connect::<W, L>))
        .route("/disconnect", post(disconnect::<W, L>))
        .route("/tip/preset/:amount", post(tip_preset::<W, L>))
        .route("/tip/custom", post(tip_custom::<W, L>))
        .route("/custom-amount", post(custom_amount::<W, L>))
        .route("/api/session", get(session_json::<W, L>))
        .layer(middleware::from_fn(guard::same_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(controller)
}

#[derive(Debug, Deserialize)]
pub struct AmountForm {
    #[serde(default)]
    pub amount: String,
}

/// JSON view of the session plus the values the page derives from it.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: SessionView,
    pub address_short: Option<String>,
    pub balance_text: String,
    pub custom_amount_sendable: bool,
    pub destination: &'static str,
}

impl From<SessionView> for SessionResponse {
    fn from(session: SessionView) -> Self {
        Self {
            address_short: session.address_short(),
            balance_text: session.balance_text(),
            custom_amount_sendable: session.custom_amount_sendable(),
            destination: TIP_JAR_ADDRESS,
            session,
        }
    }
}

async fn index<W, L>(State(c): State<Shared<W, L>>) -> Html<String>
where
    W: WalletProvider + 'static,
    L: LedgerProvider + 'static,
{
    Html(page::render(&c.snapshot().await))
}

async fn session_json<W, L>(State(c): State<Shared<W, L>>) -> Json<SessionResponse>
where
    W: WalletProvider + 'static,
    L: LedgerProvider + 'static,
{
    Json(c.snapshot().await.into())
}

async fn connect<W, L>(State(c): State<Shared<W, L>>) -> Redirect
where
    W: WalletProvider + 'static,
    L: LedgerProvider + 'static,
{
    if let Err(e) = c.connect().await {
        debug!(error = %e, "connect did not complete");
    }
    Redirect::to("/")
}

async fn disconnect<W, L>(State(c): State<Shared<W, L>>) -> Redirect
where
    W: WalletProvider + 'static,
    L: LedgerProvider + 'static,
{
    c.disconnect().await;
    Redirect::to("/")
}

async fn tip_preset<W, L>(
    State(c): State<Shared<W, L>>,
    Path(amount): Path<String>,
) -> Result<Redirect, WebError>
where
    W: WalletProvider + 'static,
    L: LedgerProvider + 'static,
{
    let preset = Amount::parse_decimal(&amount)
        .ok()
        .filter(|a| PRESETS.contains(a))
        .ok_or(WebError::UnknownPreset(amount))?;
    if let Err(e) = c.select_preset(preset).await {
        debug!(error = %e, "preset tip did not complete");
    }
    Ok(Redirect::to("/"))
}

async fn tip_custom<W, L>(
    State(c): State<Shared<W, L>>,
    Form(form): Form<AmountForm>,
) -> Redirect
where
    W: WalletProvider + 'static,
    L: LedgerProvider + 'static,
{
    c.set_custom_amount(form.amount).await;
    if let Err(e) = c.send_custom().await {
        debug!(error = %e, "custom tip did not complete");
    }
    Redirect::to("/")
}

async fn custom_amount<W, L>(
    State(c): State<Shared<W, L>>,
    Form(form): Form<AmountForm>,
) -> impl IntoResponse
where
    W: WalletProvider + 'static,
    L: LedgerProvider + 'static,
{
    c.set_custom_amount(form.amount).await;
    Json(SessionResponse::from(c.snapshot().await))
}
