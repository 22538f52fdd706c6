//! Normalization of Horizon error bodies.
//!
//! Horizon reports failures as RFC 7807 problem documents. Transaction
//! failures carry `extras.result_codes`; everything else has at most a
//! title and detail. Both collapse into a single [`LedgerError`].

use serde::Deserialize;

use crate::error::LedgerError;

#[derive(Debug, Default, Deserialize)]
struct Problem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    extras: Option<Extras>,
}

#[derive(Debug, Default, Deserialize)]
struct Extras {
    #[serde(default)]
    result_codes: Option<ResultCodes>,
}

#[derive(Debug, Default, Deserialize)]
struct ResultCodes {
    #[serde(default)]
    transaction: Option<String>,
    #[serde(default)]
    operations: Vec<String>,
}

/// Turn a non-success response into a [`LedgerError`].
///
/// A body that parses as a problem document becomes `Rejected`, with the
/// result codes when present. Anything else becomes `Http` naming the status.
pub fn normalize(status: u16, body: &str) -> LedgerError {
    let problem: Problem = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(_) => return LedgerError::Http(format!("horizon returned HTTP {status}")),
    };

    let codes = problem
        .extras
        .and_then(|e| e.result_codes)
        .unwrap_or_default();

    let detail = problem
        .detail
        .filter(|d| !d.is_empty())
        .or(problem.title.filter(|t| !t.is_empty()))
        .unwrap_or_else(|| format!("horizon returned HTTP {status}"));

    LedgerError::Rejected {
        result_code: codes.transaction.filter(|c| !c.is_empty()),
        operation_codes: codes.operations,
        detail,
    }
}
