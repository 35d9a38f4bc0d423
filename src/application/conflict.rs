//! Conflict Resolver
//!
//! Single choke point through which every range-affecting mutation
//! passes. A conflict carries the blocking reservation's id so the
//! caller can surface which booking blocks the request.

use chrono::NaiveDate;
use uuid::Uuid;

use super::availability::AvailabilityIndex;
use crate::domain::{DomainError, DomainResult};

#[derive(Clone)]
pub struct ConflictResolver {
    availability: AvailabilityIndex,
}

impl ConflictResolver {
    pub fn new(availability: AvailabilityIndex) -> Self {
        Self { availability }
    }

    /// Ok when `[start, end)` is free on the listing; otherwise
    /// `RangeConflict` naming the blocking reservation.
    pub async fn check(
        &self,
        listing_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> DomainResult<()> {
        match self
            .availability
            .first_overlapping(listing_id, start, end, exclude)
            .await?
        {
            None => Ok(()),
            Some(blocking) => Err(DomainError::RangeConflict {
                reservation_id: blocking.id,
            }),
        }
    }
}
