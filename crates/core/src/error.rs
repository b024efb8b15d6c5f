//! Errors reported by store operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Staff members.
    Resources,
    /// Client projects.
    Projects,
    /// Physical seats.
    Seats,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Resources => "resources",
            Self::Projects => "projects",
            Self::Seats => "seats",
        };
        f.write_str(label)
    }
}

/// Failure of a store operation.
///
/// The `Display` text is the message exposed through the store's error field.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The target project id does not resolve.
    #[error("Project not found")]
    ProjectNotFound {
        /// Requested project id.
        project_id: String,
    },
    /// The target resource id does not resolve.
    #[error("Resource not found")]
    ResourceNotFound {
        /// Requested resource id.
        resource_id: String,
    },
    /// The resource is unknown or has no project to leave.
    #[error("Resource not found or not assigned to a project")]
    NotAssigned {
        /// Requested resource id.
        resource_id: String,
    },
    /// The seat is unknown or already taken.
    #[error("Seat is not available")]
    SeatUnavailable {
        /// Requested seat id.
        seat_id: String,
    },
    /// The seat id does not resolve.
    #[error("Seat not found")]
    SeatNotFound {
        /// Requested seat id.
        seat_id: String,
    },
    /// Chargeability above 100 percent.
    #[error("Chargeability must be between 0 and 100")]
    InvalidChargeability {
        /// Rejected value.
        value: u8,
    },
    /// The assignment would end before it starts.
    #[error("End date cannot precede start date")]
    InvalidDateRange,
    /// The data source could not deliver a collection.
    #[error("Failed to fetch {collection}")]
    FetchFailed {
        /// Collection being loaded.
        collection: Collection,
        /// Underlying data-source error.
        #[source]
        source: anyhow::Error,
    },
}

impl StoreError {
    /// Short machine-readable kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProjectNotFound { .. } => "project-not-found",
            Self::ResourceNotFound { .. } => "resource-not-found",
            Self::NotAssigned { .. } => "resource-not-found-or-unassigned",
            Self::SeatUnavailable { .. } => "seat-not-available",
            Self::SeatNotFound { .. } => "seat-not-found",
            Self::InvalidChargeability { .. } => "invalid-chargeability",
            Self::InvalidDateRange => "invalid-date-range",
            Self::FetchFailed { .. } => "fetch-failed",
        }
    }
}
