//! Data access for the `parcel` table.
//!
//! # Responsibility
//! - Define the parcel store contract used by services.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - Status-gated writes are single conditional statements.
//! - Missing rows are reported as `NotFound`, never as a gate failure.

pub mod parcel_repo;
