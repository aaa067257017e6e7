//! Parcel record and lifecycle status.
//!
//! # Invariants
//! - `number` is zero until storage assigns one.
//! - `created_at` is opaque text once stored.
//!
//! # See also
//! - `crate::repo::parcel_repo` for how status text is read back.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Storage-assigned parcel identifier.
pub type ParcelNumber = i64;

/// External client identifier. Not checked against any client table.
pub type ClientId = i64;

/// Delivery lifecycle of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Accepted for delivery; address and deletion are still allowed.
    Registered,
    /// Handed over to the carrier.
    Sent,
    /// Received by the addressee.
    Delivered,
}

impl ParcelStatus {
    pub const ALL: [ParcelStatus; 3] = [Self::Registered, Self::Sent, Self::Delivered];

    /// Text stored in `parcel.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
    }

    /// Next step along `registered -> sent -> delivered`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Sent),
            Self::Sent => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }
}

impl std::fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `parcel` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Zero until the parcel has been stored.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    pub address: String,
    /// RFC 3339 UTC timestamp kept as text; never parsed back.
    pub created_at: String,
}

impl Parcel {
    /// Builds an unsaved `registered` parcel stamped with the current time.
    pub fn new(client: ClientId, address: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: now_rfc3339(),
        }
    }

    /// Whether the status gate for address changes and deletion is open.
    pub fn is_registered(&self) -> bool {
        self.status == ParcelStatus::Registered
    }
}

/// Current UTC time formatted like `2024-05-01T12:30:00Z`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
