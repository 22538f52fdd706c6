//! HorizonClient against an in-process fake Horizon.

use std::collections::HashMap;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::json;

use tipjar_crypto::{derive_address, keypair_from_seed, public_key_of};
use tipjar_ledger::{HorizonClient, LedgerError, LedgerProvider, DEFAULT_BASE_FEE};
use tipjar_transactions::{Asset, Operation, TransactionBuilder, TransactionEnvelope};
use tipjar_types::{AccountAddress, Amount, Network, TxReference, TIP_JAR_ADDRESS};

const FUNDED_SEQUENCE: &str = "103420918407103488";

async fn spawn(router: Router) -> HorizonClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    HorizonClient::new(format!("http://{addr}")).unwrap()
}

async fn account(Path(id): Path<String>) -> impl IntoResponse {
    if id == TIP_JAR_ADDRESS {
        (
            StatusCode::OK,
            Json(json!({
                "id": id,
                "account_id": id,
                "sequence": FUNDED_SEQUENCE,
                "balances": [
                    { "balance": "10000.0000000", "asset_type": "native" }
                ]
            })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "type": "https://stellar.org/horizon-errors/not_found",
                "title": "Resource Missing",
                "status": 404
            })),
        )
    }
}

/// Accepts any envelope that decodes and carries a signature; echoes the
/// network hash of the transaction.
async fn transactions(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
    let Some(tx) = form.get("tx") else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "title": "Missing tx" })));
    };
    match TransactionEnvelope::from_xdr_base64(tx) {
        Ok(env) if !env.signatures.is_empty() => (
            StatusCode::OK,
            Json(json!({
                "hash": env.tx.hash(Network::TESTNET.passphrase).to_string(),
                "ledger": 4242,
                "successful": true
            })),
        ),
        Ok(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "title": "Transaction Failed",
                "status": 400,
                "detail": "The transaction failed when submitted to the stellar network.",
                "extras": { "result_codes": { "transaction": "tx_bad_auth" } }
            })),
        ),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "title": "Transaction Malformed", "status": 400 })),
        ),
    }
}

fn fake_horizon(fee_stats: serde_json::Value) -> Router {
    Router::new()
        .route("/accounts/:id", get(account))
        .route("/fee_stats", get(move || async move { Json(fee_stats) }))
        .route("/transactions", post(transactions))
}

fn tip(source_seed: u8, sequence: i64) -> TransactionEnvelope {
    let source = keypair_from_seed(&[source_seed; 32]).public;
    let jar = public_key_of(&AccountAddress::new(TIP_JAR_ADDRESS)).unwrap();
    let tx = TransactionBuilder::new(source, sequence, 100)
        .add_operation(Operation::payment(jar, Asset::Native, Amount::from_units(5)).unwrap())
        .set_timeout(30)
        .build()
        .unwrap();
    TransactionEnvelope::unsigned(tx)
}

#[tokio::test]
async fn loads_funded_account() {
    let client = spawn(fake_horizon(json!({}))).await;
    let state = client
        .load_account(&AccountAddress::new(TIP_JAR_ADDRESS))
        .await
        .unwrap();
    assert_eq!(state.sequence, FUNDED_SEQUENCE.parse::<i64>().unwrap());
    assert_eq!(state.native_balance(), Some(Amount::from_units(10_000)));
}

#[tokio::test]
async fn missing_account_is_not_found() {
    let client = spawn(fake_horizon(json!({}))).await;
    let stranger = derive_address(&keypair_from_seed(&[9u8; 32]).public);
    let err = client.load_account(&stranger).await.unwrap_err();
    assert_eq!(err, LedgerError::AccountNotFound(stranger.to_string()));
}

#[tokio::test]
async fn reads_base_fee() {
    let client = spawn(fake_horizon(json!({ "last_ledger_base_fee": "300" }))).await;
    assert_eq!(client.fetch_base_fee().await.unwrap(), 300);
}

#[tokio::test]
async fn unparseable_base_fee_falls_back() {
    let client = spawn(fake_horizon(json!({ "last_ledger_base_fee": null }))).await;
    assert_eq!(client.fetch_base_fee().await.unwrap(), DEFAULT_BASE_FEE);
}

#[tokio::test]
async fn submit_returns_network_hash() {
    let client = spawn(fake_horizon(json!({}))).await;
    let keys = keypair_from_seed(&[3u8; 32]);
    let mut env = tip(3, 10);
    env.sign(Network::TESTNET.passphrase, &keys).unwrap();

    let result = client.submit(&env).await.unwrap();
    assert_eq!(result.hash, TxReference::from(env.tx.hash(Network::TESTNET.passphrase)));
    assert_eq!(result.ledger, Some(4242));
}

fn accepting_horizon(reply: serde_json::Value) -> Router {
    Router::new().route(
        "/transactions",
        post(move || async move { (StatusCode::OK, Json(reply)) }),
    )
}

#[tokio::test]
async fn accepted_submission_keeps_short_reference() {
    let client = spawn(accepting_horizon(
        json!({ "hash": "abcdef1234567890", "successful": true }),
    ))
    .await;
    let result = client.submit(&tip(3, 10)).await.unwrap();
    assert_eq!(result.hash, TxReference::new("abcdef1234567890"));
    assert_eq!(result.ledger, None);
}

#[tokio::test]
async fn accepted_submission_without_hash_uses_local_hash() {
    let client = spawn(accepting_horizon(json!({ "successful": true }))).await;
    let env = tip(3, 10);
    let result = client.submit(&env).await.unwrap();
    assert_eq!(result.hash, TxReference::from(env.tx.hash(Network::TESTNET.passphrase)));
}

#[tokio::test]
async fn rejected_submission_carries_result_code() {
    let client = spawn(fake_horizon(json!({}))).await;
    let err = client.submit(&tip(3, 10)).await.unwrap_err();
    assert_eq!(err.result_code(), Some("tx_bad_auth"));
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HorizonClient::new(format!("http://{addr}")).unwrap();
    let err = client.fetch_base_fee().await.unwrap_err();
    assert!(matches!(err, LedgerError::Http(_)));
}
