//! Transfer HTTP handlers.
//!
//! - POST /api/v1/transfers - Move funds between two accounts
//! - POST /api/v1/deposits - Credit an account from outside
//! - GET /api/v1/transfers/:id - Get a ledger entry

use crate::{
    db::DbPool,
    error::AppError,
    models::transfer::{
        DepositRequest, DepositResponse, Transfer, TransferRequest, TransferResponse,
    },
    services::transfer_service,
};
use axum::{
    Json,
    extract::{Path, State},
};

/// Move funds between two accounts.
///
/// # Atomicity
///
/// Both balance updates and the ledger entry commit in a single database
/// transaction. Either everything is applied or nothing is.
///
/// # Request Body
///
/// ```json
/// {
///   "source_account_id": 1,
///   "dest_account_id": 2,
///   "amount": 25
/// }
/// ```
///
/// # Response
///
/// - **Success (200)**: ledger entry plus both updated accounts
/// - **Error (400)**: self-transfer or non-positive amount
/// - **Error (404)**: source or destination missing (body names the id)
/// - **Error (422)**: insufficient funds
pub async fn create_transfer(
    State(pool): State<DbPool>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    let outcome = transfer_service::execute_transfer(
        &pool,
        request.source_account_id,
        request.dest_account_id,
        request.amount,
    )
    .await?;

    Ok(Json(TransferResponse {
        transfer: outcome.record,
        source: outcome.source.into(),
        destination: outcome.destination.into(),
    }))
}

/// Credit an account from outside the system.
pub async fn create_deposit(
    State(pool): State<DbPool>,
    Json(request): Json<DepositRequest>,
) -> Result<Json<DepositResponse>, AppError> {
    let outcome =
        transfer_service::execute_deposit(&pool, request.account_id, request.amount).await?;

    Ok(Json(DepositResponse {
        transfer: outcome.record,
        account: outcome.account.into(),
    }))
}

/// Get a ledger entry by id.
pub async fn get_transfer(
    State(pool): State<DbPool>,
    Path(transfer_id): Path<i64>,
) -> Result<Json<Transfer>, AppError> {
    let transfer = transfer_service::get_transfer_by_id(&pool, transfer_id)
        .await?
        .ok_or(AppError::TransferNotFound(transfer_id))?;

    Ok(Json(transfer))
}
