//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that deserializes the request, calls
//! into the service layer or runs a simple query, and returns JSON.

/// Account management endpoints
pub mod accounts;
/// Liveness endpoint
pub mod health;
/// Transfer and deposit endpoints
pub mod transfers;
