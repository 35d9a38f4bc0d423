//! Domain errors

use uuid::Uuid;

use super::reservation::ReservationStatus;

/// Domain-level error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Malformed input: bad date order, non-positive guest count,
    /// missing guest fields. Recoverable by correcting the request.
    #[error("Validation: {0}")]
    Validation(String),

    /// Requested date range overlaps an existing Pending/Confirmed
    /// reservation. Carries the blocking reservation's id.
    #[error("Dates unavailable: blocked by reservation {reservation_id}")]
    RangeConflict { reservation_id: Uuid },

    /// Requested status change is not a legal edge of the lifecycle
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    /// Referenced listing or reservation does not exist
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Underlying store failure. Safe to retry the operation as a whole.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
