//! Account data model and API request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `accounts` table. The id is a BIGSERIAL assigned by the
/// database on insert and never changes afterwards.
///
/// # Balance
///
/// Balances are stored as `i64` in the smallest currency unit, never as
/// floats. `balance >= 0` holds at every committed state; the service
/// validates it before writing and the table carries a CHECK constraint as a
/// backstop.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Account {
    /// Unique identifier, assigned on creation
    pub id: i64,

    /// Human-readable display label, no uniqueness constraint
    pub name: String,

    /// Current balance in the smallest currency unit
    pub balance: i64,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last balance update
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Alice",
///   "initial_balance": 100
/// }
/// ```
///
/// `initial_balance` defaults to 0 and must not be negative.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Name for the new account
    pub name: String,

    /// Starting balance (defaults to 0 if not provided)
    #[serde(default)]
    pub initial_balance: i64,
}

/// Response body for account endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "name": "Alice",
///   "balance": 100,
///   "created_at": "2026-08-30T10:00:00Z",
///   "updated_at": "2026-08-30T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub name: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            balance: account.balance,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
