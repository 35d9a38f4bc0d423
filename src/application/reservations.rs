//! Reservation Lifecycle Controller
//!
//! Orchestrates creation and status transitions, enforcing the overlap
//! invariant at every mutation: for a fixed listing, no two Pending or
//! Confirmed reservations may ever hold overlapping date ranges.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use super::availability::AvailabilityIndex;
use super::conflict::ConflictResolver;
use super::locks::ListingLocks;
use crate::domain::{
    DomainError, DomainResult, GuestInfo, RepositoryProvider, Reservation, ReservationStatus,
};

/// Booking request as received from the (already authorized) caller
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub listing_id: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub guest_count: i32,
    pub guest: GuestInfo,
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    availability: AvailabilityIndex,
    conflicts: ConflictResolver,
    locks: ListingLocks,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        let availability = AvailabilityIndex::new(repos.clone());
        let conflicts = ConflictResolver::new(availability.clone());
        Self {
            repos,
            availability,
            conflicts,
            locks: ListingLocks::new(),
        }
    }

    /// Create a reservation in Pending after a successful conflict check.
    ///
    /// The check-then-insert sequence runs under the listing's lock, so
    /// of two racing requests for overlapping ranges exactly one commits
    /// and the other observes the conflict (first-committer-wins).
    pub async fn create(&self, request: BookingRequest) -> DomainResult<Reservation> {
        validate_request(&request)?;

        let listing = self
            .repos
            .listings()
            .find_by_id(request.listing_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Listing",
                field: "id",
                value: request.listing_id.to_string(),
            })?;

        if request.guest_count > listing.max_guests {
            return Err(DomainError::validation(format!(
                "guest_count {} exceeds listing maximum of {}",
                request.guest_count, listing.max_guests
            )));
        }

        let lock = self.locks.for_listing(request.listing_id);
        let _guard = lock.lock().await;

        self.conflicts
            .check(request.listing_id, request.start, request.end, None)
            .await?;

        let nights = (request.end - request.start).num_days();
        let total_price = Decimal::from(nights) * listing.nightly_price;

        let reservation = Reservation::new_pending(
            request.listing_id,
            request.start,
            request.end,
            request.guest_count,
            request.guest,
            total_price,
        );
        self.repos.reservations().save(reservation.clone()).await?;

        info!(
            reservation_id = %reservation.id,
            listing_id = reservation.listing_id,
            nights,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Apply a status transition along the lifecycle graph.
    ///
    /// The status read, legality check and write all run under the
    /// listing lock, serialized against creates and other transitions:
    /// a racing cancel and confirm resolve in lock order, and a
    /// reservation can never leave a terminal state. Confirming
    /// additionally re-runs the conflict check (excluding the
    /// reservation's own id), so two Pending requests for the same
    /// range can both exist only transiently, never both be confirmed.
    pub async fn transition(
        &self,
        id: Uuid,
        target: ReservationStatus,
    ) -> DomainResult<Reservation> {
        // The first read only locates the listing whose lock serializes
        // the mutation; the status it observes is re-read under the lock.
        let listing_id = self.get(id).await?.listing_id;
        let lock = self.locks.for_listing(listing_id);
        let _guard = lock.lock().await;

        let mut reservation = self.get(id).await?;

        if !reservation.status.can_transition_to(target) {
            return Err(DomainError::InvalidTransition {
                from: reservation.status,
                to: target,
            });
        }

        if target == ReservationStatus::Confirmed {
            self.conflicts
                .check(
                    reservation.listing_id,
                    reservation.start,
                    reservation.end,
                    Some(reservation.id),
                )
                .await?;
        }
        self.repos.reservations().update_status(id, target).await?;

        debug!(reservation_id = %id, from = %reservation.status, to = %target, "Status changed");
        reservation.status = target;
        Ok(reservation)
    }

    /// Administrative hard delete; the range is freed for future queries
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.repos.reservations().delete(id).await?;
        info!(reservation_id = %id, "Reservation deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn list(&self) -> DomainResult<Vec<Reservation>> {
        self.repos.reservations().find_all().await
    }

    pub async fn list_for_listing(&self, listing_id: i32) -> DomainResult<Vec<Reservation>> {
        self.repos.reservations().find_for_listing(listing_id).await
    }

    /// Booked (Pending/Confirmed) ranges for calendar display
    pub async fn booked_ranges(&self, listing_id: i32) -> DomainResult<Vec<(NaiveDate, NaiveDate)>> {
        self.availability.booked_ranges(listing_id).await
    }

    pub fn availability(&self) -> &AvailabilityIndex {
        &self.availability
    }
}

fn validate_request(request: &BookingRequest) -> DomainResult<()> {
    if request.start >= request.end {
        return Err(DomainError::validation(
            "start date must be before end date",
        ));
    }
    if request.guest_count < 1 {
        return Err(DomainError::validation("guest_count must be positive"));
    }
    let guest = &request.guest;
    if guest.full_name.trim().is_empty()
        || guest.phone.trim().is_empty()
        || guest.address.trim().is_empty()
    {
        return Err(DomainError::validation(
            "guest full_name, phone and address are required",
        ));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Listing;
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn guest() -> GuestInfo {
        GuestInfo {
            full_name: "Amina Berrada".into(),
            phone: "+212600112233".into(),
            address: "12 Rue Atlas, Casablanca".into(),
        }
    }

    fn request(listing_id: i32, start: &str, end: &str) -> BookingRequest {
        BookingRequest {
            listing_id,
            start: date(start),
            end: date(end),
            guest_count: 2,
            guest: guest(),
        }
    }

    async fn service_with_listing() -> (ReservationService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos
            .listings()
            .save(Listing::new(1, "host-1", "Riad Gueliz", dec!(800), "MAD", 4))
            .await
            .unwrap();
        let service = ReservationService::new(repos.clone());
        (service, repos)
    }

    #[tokio::test]
    async fn create_returns_pending_reservation() {
        let (service, _) = service_with_listing().await;
        let r = service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();

        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.nights(), 5);
        assert_eq!(r.total_price, dec!(4000));
    }

    #[tokio::test]
    async fn created_range_is_no_longer_free() {
        let (service, _) = service_with_listing().await;
        service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();

        let free = service
            .availability()
            .is_range_free(1, date("2024-01-10"), date("2024-01-15"), None)
            .await
            .unwrap();
        assert!(!free);
    }

    #[tokio::test]
    async fn adjacent_ranges_both_succeed() {
        let (service, _) = service_with_listing().await;
        service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();
        service
            .create(request(1, "2024-01-15", "2024-01-20"))
            .await
            .unwrap();

        let booked = service.booked_ranges(1).await.unwrap();
        assert_eq!(
            booked,
            vec![
                (date("2024-01-10"), date("2024-01-15")),
                (date("2024-01-15"), date("2024-01-20")),
            ]
        );
    }

    #[tokio::test]
    async fn overlapping_create_fails_with_blocking_id() {
        let (service, _) = service_with_listing().await;
        let first = service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();

        let err = service
            .create(request(1, "2024-01-12", "2024-01-18"))
            .await
            .unwrap_err();

        match err {
            DomainError::RangeConflict { reservation_id } => {
                assert_eq!(reservation_id, first.id)
            }
            other => panic!("expected RangeConflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancel_frees_the_range() {
        let (service, _) = service_with_listing().await;
        let first = service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();

        service
            .transition(first.id, ReservationStatus::Cancelled)
            .await
            .unwrap();

        // The now-freed range can be booked again
        service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_frees_the_range() {
        let (service, _) = service_with_listing().await;
        let first = service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();

        service.delete(first.id).await.unwrap();
        assert!(service.booked_ranges(1).await.unwrap().is_empty());

        service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn transition_into_pending_always_rejected() {
        let (service, _) = service_with_listing().await;

        // Reach every state and try to re-enter Pending from each
        let pending = service
            .create(request(1, "2024-01-01", "2024-01-03"))
            .await
            .unwrap();
        let confirmed = service
            .create(request(1, "2024-02-01", "2024-02-03"))
            .await
            .unwrap();
        service
            .transition(confirmed.id, ReservationStatus::Confirmed)
            .await
            .unwrap();
        let cancelled = service
            .create(request(1, "2024-03-01", "2024-03-03"))
            .await
            .unwrap();
        service
            .transition(cancelled.id, ReservationStatus::Cancelled)
            .await
            .unwrap();
        let completed = service
            .create(request(1, "2024-04-01", "2024-04-03"))
            .await
            .unwrap();
        service
            .transition(completed.id, ReservationStatus::Confirmed)
            .await
            .unwrap();
        service
            .transition(completed.id, ReservationStatus::Completed)
            .await
            .unwrap();

        for id in [pending.id, confirmed.id, cancelled.id, completed.id] {
            let err = service
                .transition(id, ReservationStatus::Pending)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::InvalidTransition { .. }));
        }
    }

    #[tokio::test]
    async fn terminal_states_reject_all_transitions() {
        let (service, _) = service_with_listing().await;
        let r = service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();
        service
            .transition(r.id, ReservationStatus::Cancelled)
            .await
            .unwrap();

        for target in [
            ReservationStatus::Confirmed,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            let err = service.transition(r.id, target).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidTransition { .. }));
        }
    }

    #[tokio::test]
    async fn confirm_excludes_own_range_from_the_check() {
        let (service, _) = service_with_listing().await;
        let r = service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();

        // The reservation's own range must not block its confirmation
        let confirmed = service
            .transition(r.id, ReservationStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn confirm_rechecks_against_other_blocking_reservations() {
        let (service, repos) = service_with_listing().await;
        let first = service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();

        // Force an overlapping Pending reservation into the store,
        // bypassing the service, to model the state a multi-writer
        // deployment without the listing lock could reach.
        let duplicate = Reservation::new_pending(
            1,
            date("2024-01-10"),
            date("2024-01-15"),
            2,
            guest(),
            dec!(4000),
        );
        repos.reservations().save(duplicate.clone()).await.unwrap();

        let err = service
            .transition(duplicate.id, ReservationStatus::Confirmed)
            .await
            .unwrap_err();
        match err {
            DomainError::RangeConflict { reservation_id } => {
                assert_eq!(reservation_id, first.id)
            }
            other => panic!("expected RangeConflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn racing_overlapping_creates_commit_exactly_one() {
        let (service, _) = service_with_listing().await;
        let service = Arc::new(service);

        let a = {
            let s = service.clone();
            tokio::spawn(async move { s.create(request(1, "2024-01-10", "2024-01-15")).await })
        };
        let b = {
            let s = service.clone();
            tokio::spawn(async move { s.create(request(1, "2024-01-12", "2024-01-18")).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one racing create must win");

        let loser = if a.is_err() { a } else { b };
        assert!(matches!(
            loser.unwrap_err(),
            DomainError::RangeConflict { .. }
        ));
    }

    #[tokio::test]
    async fn racing_confirm_and_cancel_never_resurrect_a_cancellation() {
        let (service, _) = service_with_listing().await;
        let service = Arc::new(service);

        for _ in 0..200 {
            let id = service
                .create(request(1, "2024-01-10", "2024-01-15"))
                .await
                .unwrap()
                .id;

            let confirm = {
                let s = service.clone();
                tokio::spawn(async move { s.transition(id, ReservationStatus::Confirmed).await })
            };
            let cancel = {
                let s = service.clone();
                tokio::spawn(async move { s.transition(id, ReservationStatus::Cancelled).await })
            };
            let (confirm, cancel) = (confirm.await.unwrap(), cancel.await.unwrap());

            // Cancel is a legal edge from both Pending and Confirmed, so
            // it always lands; a confirm arriving after it must be
            // rejected rather than overwrite the terminal state.
            assert!(cancel.is_ok());
            if let Err(e) = confirm {
                assert!(matches!(e, DomainError::InvalidTransition { .. }));
            }
            let status = service.get(id).await.unwrap().status;
            assert_eq!(status, ReservationStatus::Cancelled);
        }
    }

    #[tokio::test]
    async fn total_price_is_immutable_after_listing_price_change() {
        let (service, repos) = service_with_listing().await;
        let r = service
            .create(request(1, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();
        assert_eq!(r.total_price, dec!(4000));

        // Replace the listing with a higher nightly price
        repos.listings().delete(1).await.unwrap();
        repos
            .listings()
            .save(Listing::new(1, "host-1", "Riad Gueliz", dec!(1200), "MAD", 4))
            .await
            .unwrap();

        let reloaded = service.get(r.id).await.unwrap();
        assert_eq!(reloaded.total_price, dec!(4000));
    }

    #[tokio::test]
    async fn validation_rejects_bad_input() {
        let (service, _) = service_with_listing().await;

        // Reversed dates
        let err = service
            .create(request(1, "2024-01-15", "2024-01-10"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Zero-night stay
        let err = service
            .create(request(1, "2024-01-10", "2024-01-10"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Too many guests for the listing
        let mut req = request(1, "2024-01-10", "2024-01-15");
        req.guest_count = 9;
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Blank guest name
        let mut req = request(1, "2024-01-10", "2024-01-15");
        req.guest.full_name = "  ".into();
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let (service, _) = service_with_listing().await;
        let err = service
            .create(request(99, "2024-01-10", "2024-01-15"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Listing", .. }));
    }

    #[tokio::test]
    async fn availability_of_unknown_listing_is_vacuously_free() {
        let (service, _) = service_with_listing().await;
        assert!(service.booked_ranges(42).await.unwrap().is_empty());
        assert!(service
            .availability()
            .is_range_free(42, date("2024-01-10"), date("2024-01-15"), None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn blocking_invariant_holds_after_mixed_operations() {
        let (service, _) = service_with_listing().await;

        let a = service
            .create(request(1, "2024-01-01", "2024-01-05"))
            .await
            .unwrap();
        let _ = service
            .create(request(1, "2024-01-05", "2024-01-09"))
            .await
            .unwrap();
        service
            .transition(a.id, ReservationStatus::Cancelled)
            .await
            .unwrap();
        let c = service
            .create(request(1, "2024-01-03", "2024-01-06"))
            .await
            .unwrap_err();
        assert!(matches!(c, DomainError::RangeConflict { .. }));
        service
            .create(request(1, "2024-01-01", "2024-01-05"))
            .await
            .unwrap();

        // No two blocking reservations overlap
        let booked = service.booked_ranges(1).await.unwrap();
        for w in booked.windows(2) {
            assert!(w[0].1 <= w[1].0, "blocking ranges overlap: {booked:?}");
        }
    }
}
