//! In-memory repository implementations for development and testing

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, Listing, ListingRepository, RepositoryProvider, Reservation,
    ReservationRepository, ReservationStatus,
};

#[derive(Default)]
pub struct InMemoryListingRepository {
    listings: DashMap<i32, Listing>,
    counter: AtomicI32,
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn save(&self, listing: Listing) -> DomainResult<()> {
        self.listings.insert(listing.id, listing);
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Listing>> {
        Ok(self.listings.get(&id).map(|l| l.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Listing>> {
        let mut all: Vec<Listing> = self.listings.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.listings
            .remove(&id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Listing",
                field: "id",
                value: id.to_string(),
            })?;
        Ok(())
    }

    async fn next_id(&self) -> DomainResult<i32> {
        Ok(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[derive(Default)]
pub struct InMemoryReservationRepository {
    reservations: DashMap<Uuid, Reservation>,
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, reservation: Reservation) -> DomainResult<()> {
        self.reservations.insert(reservation.id, reservation);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn update_status(&self, id: Uuid, status: ReservationStatus) -> DomainResult<()> {
        let mut entry = self
            .reservations
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            })?;
        entry.status = status;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.reservations
            .remove(&id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            })?;
        Ok(())
    }

    async fn find_blocking_for_listing(&self, listing_id: i32) -> DomainResult<Vec<Reservation>> {
        let mut blocking: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|e| e.listing_id == listing_id && e.is_blocking())
            .map(|e| e.value().clone())
            .collect();
        blocking.sort_by_key(|r| r.start);
        Ok(blocking)
    }

    async fn find_for_listing(&self, listing_id: i32) -> DomainResult<Vec<Reservation>> {
        let mut all: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|e| e.listing_id == listing_id)
            .map(|e| e.value().clone())
            .collect();
        all.sort_by_key(|r| r.start);
        Ok(all)
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let mut all: Vec<Reservation> =
            self.reservations.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

/// In-memory provider used by tests; same trait surface as the SeaORM one
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    listings: InMemoryListingRepository,
    reservations: InMemoryReservationRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn listings(&self) -> &dyn ListingRepository {
        &self.listings
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::domain::GuestInfo;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn reservation(listing_id: i32, start: &str, end: &str) -> Reservation {
        Reservation::new_pending(
            listing_id,
            date(start),
            date(end),
            2,
            GuestInfo {
                full_name: "Sara Alaoui".into(),
                phone: "+212622334455".into(),
                address: "Hay Riad, Rabat".into(),
            },
            dec!(1600),
        )
    }

    #[tokio::test]
    async fn blocking_query_filters_status_and_sorts_by_start() {
        let repo = InMemoryReservationRepository::default();

        let late = reservation(1, "2024-03-01", "2024-03-05");
        let early = reservation(1, "2024-01-01", "2024-01-05");
        let mut cancelled = reservation(1, "2024-02-01", "2024-02-05");
        cancelled.status = ReservationStatus::Cancelled;
        let other_listing = reservation(2, "2024-01-01", "2024-01-05");

        for r in [&late, &early, &cancelled, &other_listing] {
            repo.save(r.clone()).await.unwrap();
        }

        let blocking = repo.find_blocking_for_listing(1).await.unwrap();
        let ids: Vec<Uuid> = blocking.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[tokio::test]
    async fn update_status_on_missing_id_is_not_found() {
        let repo = InMemoryReservationRepository::default();
        let err = repo
            .update_status(Uuid::new_v4(), ReservationStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn listing_ids_are_monotonic() {
        let repo = InMemoryListingRepository::default();
        assert_eq!(repo.next_id().await.unwrap(), 1);
        assert_eq!(repo.next_id().await.unwrap(), 2);
    }
}
