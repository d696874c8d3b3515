//! Data models representing database entities.

/// Account entity model
pub mod account;
/// Transfer ledger model
pub mod transfer;
