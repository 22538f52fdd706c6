//! Same-origin check for state-changing requests.
//!
//! The local signer approves every request it is given, so a form posted
//! from another site must never reach the controller. A request carrying an
//! `Origin` (or, failing that, a `Referer`) must name the host it was sent
//! to. Requests with neither header come from non-browser clients and pass.

use axum::extract::Request;
use axum::http::header::{HOST, ORIGIN, REFERER};
use axum::http::{HeaderMap, Uri};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::WebError;

pub async fn same_origin(req: Request, next: Next) -> Result<Response, WebError> {
    if !req.method().is_safe() {
        if let Some(source) = foreign_source(req.headers()) {
            warn!(method = %req.method(), path = %req.uri().path(), %source, "cross-origin request refused");
            return Err(WebError::CrossOrigin(source));
        }
    }
    Ok(next.run(req).await)
}

/// The offending `Origin`/`Referer` value, if the request came from elsewhere.
fn foreign_source(headers: &HeaderMap) -> Option<String> {
    let source = headers.get(ORIGIN).or_else(|| headers.get(REFERER))?;
    let source = String::from_utf8_lossy(source.as_bytes()).into_owned();
    let host = headers.get(HOST).and_then(|h| h.to_str().ok());
    match (authority_of(&source), host) {
        (Some(from), Some(host)) if from.eq_ignore_ascii_case(host.trim()) => None,
        _ => Some(source),
    }
}

/// `host[:port]` of an absolute URL. `null` and relative values have none.
fn authority_of(value: &str) -> Option<String> {
    let uri: Uri = value.trim().parse().ok()?;
    uri.scheme()?;
    uri.authority().map(|a| a.as_str().to_string())
}
