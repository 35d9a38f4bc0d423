//! Availability Index
//!
//! Answers, for a listing and a candidate date range, whether the range
//! is free, and produces the booked ranges for calendar display. Only
//! Pending and Confirmed reservations hold dates. Pure queries, no side
//! effects; a non-existent listing is vacuously free (listing existence
//! is validated by the caller).

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{DomainResult, RepositoryProvider, Reservation};

#[derive(Clone)]
pub struct AvailabilityIndex {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityIndex {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// First Pending/Confirmed reservation (by start date) overlapping
    /// `[start, end)`, ignoring `exclude` if given.
    pub async fn first_overlapping(
        &self,
        listing_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> DomainResult<Option<Reservation>> {
        let blocking = self
            .repos
            .reservations()
            .find_blocking_for_listing(listing_id)
            .await?;

        Ok(blocking
            .into_iter()
            .filter(|r| Some(r.id) != exclude)
            .find(|r| r.overlaps(start, end)))
    }

    /// True iff no Pending/Confirmed reservation for the listing overlaps
    /// `[start, end)`. Precondition: start < end.
    pub async fn is_range_free(
        &self,
        listing_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> DomainResult<bool> {
        Ok(self
            .first_overlapping(listing_id, start, end, exclude)
            .await?
            .is_none())
    }

    /// All Pending/Confirmed ranges for the listing, ordered by start
    /// date ascending. Stateless, safe to call repeatedly.
    pub async fn booked_ranges(&self, listing_id: i32) -> DomainResult<Vec<(NaiveDate, NaiveDate)>> {
        let blocking = self
            .repos
            .reservations()
            .find_blocking_for_listing(listing_id)
            .await?;

        Ok(blocking.into_iter().map(|r| (r.start, r.end)).collect())
    }
}
