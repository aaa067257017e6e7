//! Domain model for tracked parcels.
//!
//! # Invariants
//! - A parcel is identified by its storage-assigned `number`.
//! - Only `registered` parcels may change address or be deleted.

pub mod parcel;
