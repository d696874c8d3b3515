//! Transfer ledger model and API request/response types.
//!
//! Every balance mutation leaves a row in the `transfers` ledger, written in
//! the same database transaction as the balance updates themselves. The audit
//! trail therefore can never disagree with committed balances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::account::AccountResponse;

/// Represents a ledger entry from the `transfers` table.
///
/// `kind` is either `"transfer"` (two accounts involved) or `"deposit"`
/// (funds credited from outside; `source_account_id` is NULL).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transfer {
    /// Unique identifier for this ledger entry
    pub id: i64,

    /// "transfer" or "deposit"
    pub kind: String,

    /// Account debited; NULL for deposits
    pub source_account_id: Option<i64>,

    /// Account credited
    pub dest_account_id: i64,

    /// Amount moved, always positive
    pub amount: i64,

    /// When the entry was committed
    pub created_at: DateTime<Utc>,
}

/// Request to move funds between two accounts.
///
/// # JSON Example
///
/// ```json
/// {
///   "source_account_id": 1,
///   "dest_account_id": 2,
///   "amount": 25
/// }
/// ```
///
/// # Validation
///
/// - Source and destination must differ
/// - Amount must be positive
/// - Source must have sufficient balance
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Account to transfer from (will decrease)
    pub source_account_id: i64,

    /// Account to transfer to (will increase)
    pub dest_account_id: i64,

    /// Amount to transfer
    pub amount: i64,
}

/// Request to credit an account from outside the system.
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    /// Account to credit
    pub account_id: i64,

    /// Amount to add, must be positive
    pub amount: i64,
}

/// Response returned for a successful transfer.
///
/// Both updated accounts are returned, not just the source. The ledger entry
/// records what moved.
///
/// # JSON Example
///
/// ```json
/// {
///   "transfer": { "id": 7, "kind": "transfer", "source_account_id": 1,
///                 "dest_account_id": 2, "amount": 25,
///                 "created_at": "2026-08-30T10:00:00Z" },
///   "source": { "id": 1, "name": "Alice", "balance": 75, ... },
///   "destination": { "id": 2, "name": "Bob", "balance": 125, ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub transfer: Transfer,
    pub source: AccountResponse,
    pub destination: AccountResponse,
}

/// Response returned for a successful deposit.
#[derive(Debug, Serialize)]
pub struct DepositResponse {
    pub transfer: Transfer,
    pub account: AccountResponse,
}
