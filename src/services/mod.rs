//! Business logic services.
//!
//! Services contain the core business logic separated from HTTP handlers.
//! They own database transactions, validation, and locking.

pub mod transfer_service;
