//! Shared HTTP plumbing: error classification and response decoding.
//!
//! Classification contract: a request that never produced a response maps to
//! `CompanionError::Unreachable`; an error status maps to `Rejected` with the
//! detail pulled from a structured `{"detail": ...}` body when present.

use companion_core::{CompanionError, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

/// Classifies a `reqwest` failure that occurred before a usable response
/// existed.
pub(crate) fn classify(err: reqwest::Error) -> CompanionError {
    if err.status().is_some() {
        // A response arrived but could not be consumed.
        CompanionError::invalid_response(err.to_string())
    } else {
        tracing::debug!(target: "transport", error = %err, "request produced no response");
        CompanionError::Unreachable
    }
}

/// Pulls the user-facing detail out of an error response body.
///
/// The backend wraps failures as `{"detail": "..."}`; anything else falls
/// back to the status line.
pub(crate) fn extract_detail(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| format!("server returned {status}"))
}

/// Converts an error-status response into a `Rejected` error.
pub(crate) async fn rejection(response: Response) -> CompanionError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    CompanionError::rejected(extract_detail(status, &body))
}

/// Decodes a JSON body, first converting error statuses into `Rejected`.
pub(crate) async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(rejection(response).await);
    }
    response
        .json()
        .await
        .map_err(|err| CompanionError::invalid_response(format!("failed to decode response: {err}")))
}

/// Checks the status of a response whose body is irrelevant.
pub(crate) async fn expect_ok(response: Response) -> Result<()> {
    if !response.status().is_success() {
        return Err(rejection(response).await);
    }
    Ok(())
}
