//! Account management HTTP handlers.
//!
//! - POST /api/v1/accounts - Create a new account
//! - GET /api/v1/accounts - List all accounts
//! - GET /api/v1/accounts/:id - Get account by id
//! - GET /api/v1/accounts/:id/transfers - Ledger entries touching an account

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        account::{Account, AccountResponse, CreateAccountRequest},
        transfer::Transfer,
    },
    services::transfer_service,
};
use axum::{
    Json,
    extract::{Path, State},
};

/// Validate an account-creation request before touching the database.
///
/// The starting balance must already satisfy the non-negativity invariant;
/// the database CHECK constraint is only a backstop.
fn validate_create_account(initial_balance: i64) -> Result<(), AppError> {
    if initial_balance < 0 {
        return Err(AppError::InvalidOperation(
            "initial balance must not be negative".to_string(),
        ));
    }

    Ok(())
}

/// Create a new account with an optional initial balance.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Alice",
///   "initial_balance": 100
/// }
/// ```
///
/// # Response
///
/// - **Success (200)**: the created account, id assigned by the database
/// - **Error (400)**: negative initial balance
/// - **Error (500)**: database error
pub async fn create_account(
    State(pool): State<DbPool>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    validate_create_account(request.initial_balance)?;

    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (name, balance)
        VALUES ($1, $2)
        RETURNING id, name, balance, created_at, updated_at
        "#,
    )
    .bind(request.name)
    .bind(request.initial_balance)
    .fetch_one(&pool)
    .await?;

    Ok(Json(account.into()))
}

/// Get a specific account by id.
///
/// Returns 404 with the offending id if the account does not exist.
pub async fn get_account(
    State(pool): State<DbPool>,
    Path(account_id): Path<i64>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, name, balance, created_at, updated_at
        FROM accounts
        WHERE id = $1
        "#,
    )
    .bind(account_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::AccountNotFound(account_id))?;

    Ok(Json(account.into()))
}

/// List all accounts, newest first.
pub async fn list_accounts(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let accounts = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, name, balance, created_at, updated_at
        FROM accounts
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let responses: Vec<AccountResponse> = accounts.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// List the ledger entries where this account is source or destination.
///
/// Returns 404 if the account itself does not exist, so a missing account is
/// distinguishable from an account with no history.
pub async fn list_account_transfers(
    State(pool): State<DbPool>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Transfer>>, AppError> {
    // Two separate pool queries, not one transaction: accounts are never
    // deleted, so the account cannot vanish between the existence check and
    // the ledger read.
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
        .bind(account_id)
        .fetch_one(&pool)
        .await?;

    if !exists {
        return Err(AppError::AccountNotFound(account_id));
    }

    let transfers = transfer_service::list_transfers_for_account(&pool, account_id).await?;

    Ok(Json(transfers))
}
