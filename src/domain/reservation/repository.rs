//! Reservation repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Reservation, ReservationStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Save a new reservation
    async fn save(&self, reservation: Reservation) -> DomainResult<()>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Reservation>>;

    /// Set the status of an existing reservation. Dates and total price
    /// are never altered after creation.
    async fn update_status(&self, id: Uuid, status: ReservationStatus) -> DomainResult<()>;

    /// Hard delete (administrative). Errors with NotFound if absent.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// All Pending/Confirmed reservations for a listing, ordered by
    /// start date ascending. These are the ranges that hold dates.
    async fn find_blocking_for_listing(&self, listing_id: i32) -> DomainResult<Vec<Reservation>>;

    /// All reservations for a listing (any status), ordered by start date
    async fn find_for_listing(&self, listing_id: i32) -> DomainResult<Vec<Reservation>>;

    /// All reservations (any status), newest first
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;
}
