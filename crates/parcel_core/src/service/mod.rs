//! Parcel use-case services.
//!
//! # Responsibility
//! - Turn store operations into tracker use-cases.
//! - Emit one structured log event per use-case outcome.

pub mod parcel_service;
