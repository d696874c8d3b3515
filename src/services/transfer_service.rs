//! Transfer service - core business logic for moving funds between accounts.
//!
//! This service owns:
//! - Request validation (self-transfer, non-positive amounts)
//! - Row locking and balance checks
//! - The transfer ledger
//! - Database transaction management
//!
//! # Atomicity Guarantees
//!
//! Every balance mutation happens inside a single PostgreSQL transaction: the
//! locked read of both accounts, the balance checks, both row updates, and
//! the ledger insert commit together or not at all. Concurrent transfers can
//! never observe or apply an interleaved partial state.
//!
//! # Lock Ordering
//!
//! Both account rows are locked with `SELECT ... FOR UPDATE` in ascending id
//! order. Two transfers moving funds in opposite directions between the same
//! pair of accounts therefore always acquire locks in the same order and
//! cannot deadlock each other.

use crate::{
    db::DbPool,
    error::AppError,
    models::{account::Account, transfer::Transfer},
};

/// Result of a committed transfer: the ledger entry plus both updated
/// accounts.
///
/// Both sides are returned deliberately. Returning only the source account
/// would hide the destination's new state from the caller even though both
/// rows were mutated.
#[derive(Debug)]
pub struct TransferOutcome {
    pub record: Transfer,
    pub source: Account,
    pub destination: Account,
}

/// Result of a committed deposit.
#[derive(Debug)]
pub struct DepositOutcome {
    pub record: Transfer,
    pub account: Account,
}

/// Validate a transfer request before touching the database.
///
/// Checked in order: self-transfer first, then amount positivity. Both are
/// semantic errors in the request itself, so both map to `InvalidOperation`.
fn validate_transfer_request(
    source_id: i64,
    dest_id: i64,
    amount: i64,
) -> Result<(), AppError> {
    if source_id == dest_id {
        return Err(AppError::InvalidOperation(
            "cannot transfer to the same account".to_string(),
        ));
    }

    if amount <= 0 {
        return Err(AppError::InvalidOperation(
            "amount must be positive".to_string(),
        ));
    }

    Ok(())
}

/// Execute an atomic transfer between two accounts.
///
/// # Process
///
/// 1. Validate the request (self-transfer, positive amount)
/// 2. Start a database transaction
/// 3. Lock both account rows in ascending id order
/// 4. Verify source exists, destination exists, source can cover the amount
/// 5. Apply both balance updates and record the ledger entry
/// 6. Commit (any failure rolls everything back)
///
/// # Errors
///
/// - `InvalidOperation`: self-transfer or non-positive amount
/// - `AccountNotFound`: source or destination missing (the error carries
///   whichever id was bad, source checked first)
/// - `InsufficientFunds`: source balance cannot cover the amount
/// - `Storage`: database error; the transaction is rolled back
pub async fn execute_transfer(
    pool: &DbPool,
    source_id: i64,
    dest_id: i64,
    amount: i64,
) -> Result<TransferOutcome, AppError> {
    validate_transfer_request(source_id, dest_id, amount)?;

    let mut tx = pool.begin().await?;

    // Lock both rows up front. ORDER BY id makes PostgreSQL acquire the row
    // locks in ascending id order regardless of transfer direction.
    let locked: Vec<Account> = sqlx::query_as(
        r#"
        SELECT id, name, balance, created_at, updated_at
        FROM accounts
        WHERE id = ANY($1)
        ORDER BY id
        FOR UPDATE
        "#,
    )
    .bind(vec![source_id, dest_id])
    .fetch_all(&mut *tx)
    .await?;

    let Some(source) = locked.iter().find(|a| a.id == source_id) else {
        tx.rollback().await?;
        return Err(AppError::AccountNotFound(source_id));
    };

    if !locked.iter().any(|a| a.id == dest_id) {
        tx.rollback().await?;
        return Err(AppError::AccountNotFound(dest_id));
    }

    // Balance check against the locked row. No other transaction can change
    // it until we commit or roll back.
    if source.balance < amount {
        tx.rollback().await?;
        return Err(AppError::InsufficientFunds);
    }

    let source = sqlx::query_as::<_, Account>(
        r#"
        UPDATE accounts
        SET balance = balance - $1,
            updated_at = NOW()
        WHERE id = $2
        RETURNING id, name, balance, created_at, updated_at
        "#,
    )
    .bind(amount)
    .bind(source_id)
    .fetch_one(&mut *tx)
    .await?;

    let destination = sqlx::query_as::<_, Account>(
        r#"
        UPDATE accounts
        SET balance = balance + $1,
            updated_at = NOW()
        WHERE id = $2
        RETURNING id, name, balance, created_at, updated_at
        "#,
    )
    .bind(amount)
    .bind(dest_id)
    .fetch_one(&mut *tx)
    .await?;

    // Ledger entry in the same transaction as the balance updates
    let record = sqlx::query_as::<_, Transfer>(
        r#"
        INSERT INTO transfers (kind, source_account_id, dest_account_id, amount)
        VALUES ('transfer', $1, $2, $3)
        RETURNING id, kind, source_account_id, dest_account_id, amount, created_at
        "#,
    )
    .bind(source_id)
    .bind(dest_id)
    .bind(amount)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(TransferOutcome {
        record,
        source,
        destination,
    })
}

/// Execute a deposit (credit an account from outside the system).
///
/// # Errors
///
/// - `InvalidOperation`: non-positive amount
/// - `AccountNotFound`: account doesn't exist
/// - `Storage`: database error
pub async fn execute_deposit(
    pool: &DbPool,
    account_id: i64,
    amount: i64,
) -> Result<DepositOutcome, AppError> {
    if amount <= 0 {
        return Err(AppError::InvalidOperation(
            "amount must be positive".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    let account = sqlx::query_as::<_, Account>(
        r#"
        UPDATE accounts
        SET balance = balance + $1,
            updated_at = NOW()
        WHERE id = $2
        RETURNING id, name, balance, created_at, updated_at
        "#,
    )
    .bind(amount)
    .bind(account_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(account) = account else {
        tx.rollback().await?;
        return Err(AppError::AccountNotFound(account_id));
    };

    let record = sqlx::query_as::<_, Transfer>(
        r#"
        INSERT INTO transfers (kind, source_account_id, dest_account_id, amount)
        VALUES ('deposit', NULL, $1, $2)
        RETURNING id, kind, source_account_id, dest_account_id, amount, created_at
        "#,
    )
    .bind(account_id)
    .bind(amount)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(DepositOutcome { record, account })
}

/// Get a ledger entry by id.
pub async fn get_transfer_by_id(
    pool: &DbPool,
    transfer_id: i64,
) -> Result<Option<Transfer>, AppError> {
    let transfer = sqlx::query_as::<_, Transfer>(
        r#"
        SELECT id, kind, source_account_id, dest_account_id, amount, created_at
        FROM transfers
        WHERE id = $1
        "#,
    )
    .bind(transfer_id)
    .fetch_optional(pool)
    .await?;

    Ok(transfer)
}

/// List all ledger entries touching an account, newest first.
pub async fn list_transfers_for_account(
    pool: &DbPool,
    account_id: i64,
) -> Result<Vec<Transfer>, AppError> {
    let transfers = sqlx::query_as::<_, Transfer>(
        r#"
        SELECT id, kind, source_account_id, dest_account_id, amount, created_at
        FROM transfers
        WHERE source_account_id = $1 OR dest_account_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(transfers)
}
