//! Error types and HTTP error response handling.
//!
//! Every failure the service can report is a variant of [`AppError`], so
//! callers can branch on the failure kind instead of inspecting message
//! strings. Each variant maps to a specific HTTP status code and a stable
//! machine-readable error code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - `InvalidOperation`: the request is malformed at the semantic level
///   (self-transfer, non-positive amount, negative initial balance). Never
///   retried.
/// - `AccountNotFound`: a referenced account id does not exist. Carries the
///   offending id so the caller knows which side of a transfer was bad.
/// - `InsufficientFunds`: a business-rule violation, not a system fault.
/// - `Storage`: the transaction could not commit (deadlock, connectivity,
///   constraint violation). The caller may retry with backoff; the service
///   itself never retries, since it keeps no idempotency tracking and a
///   retried maybe-committed transaction could apply twice.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Semantically invalid request (e.g. transfer to the same account).
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Referenced account does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Account {0} not found")]
    AccountNotFound(i64),

    /// Referenced ledger entry does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Transfer {0} not found")]
    TransferNotFound(i64),

    /// Source account balance cannot cover the requested amount.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Database operation failed (connection error, failed commit, ...).
    ///
    /// Wraps any sqlx::Error via `#[from]`. Details are logged server-side
    /// but never leaked to the client.
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Convert AppError into an HTTP response.
///
/// All errors use the same JSON envelope:
///
/// ```json
/// {
///   "error": {
///     "code": "insufficient_funds",
///     "message": "Insufficient funds"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidOperation(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_operation", msg.clone())
            }
            AppError::AccountNotFound(_) => {
                (StatusCode::NOT_FOUND, "account_not_found", self.to_string())
            }
            AppError::TransferNotFound(_) => {
                (StatusCode::NOT_FOUND, "transfer_not_found", self.to_string())
            }
            AppError::InsufficientFunds => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "insufficient_funds",
                self.to_string(),
            ),
            AppError::Storage(ref err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_distinct_per_kind() {
        assert_eq!(
            AppError::InvalidOperation("self-transfer".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AccountNotFound(999).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InsufficientFunds.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Storage(sqlx::Error::PoolTimedOut)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_offending_id() {
        assert_eq!(AppError::AccountNotFound(999).to_string(), "Account 999 not found");
    }
}
