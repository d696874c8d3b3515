//! Transfer service library.
//!
//! A small HTTP backend exposing account management and an atomic
//! balance-transfer operation over PostgreSQL.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries, row-level locking)
//! - **Format**: JSON requests/responses
//!
//! The binary in `main.rs` wires [`app`] to a TCP listener; integration
//! tests build the same router against a test database.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::DbPool;

/// Build the HTTP router with all routes and middleware.
///
/// The connection pool is the only shared state; it is injected here and
/// extracted by handlers via `State`.
pub fn app(pool: DbPool) -> Router {
    Router::new()
        // Liveness
        .route("/health", get(handlers::health::health_check))
        // Account management routes
        .route("/api/v1/accounts", post(handlers::accounts::create_account))
        .route("/api/v1/accounts", get(handlers::accounts::list_accounts))
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::accounts::get_account),
        )
        .route(
            "/api/v1/accounts/{id}/transfers",
            get(handlers::accounts::list_account_transfers),
        )
        // Transfer routes
        .route(
            "/api/v1/transfers",
            post(handlers::transfers::create_transfer),
        )
        .route(
            "/api/v1/transfers/{id}",
            get(handlers::transfers::get_transfer),
        )
        .route(
            "/api/v1/deposits",
            post(handlers::transfers::create_deposit),
        )
        // Request tracing for observability
        .layer(TraceLayer::new_for_http())
        // Browser clients may call from anywhere
        .layer(CorsLayer::permissive())
        // Share database pool with all handlers via State extraction
        .with_state(pool)
}
