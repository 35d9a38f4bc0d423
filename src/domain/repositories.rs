//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories. Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let listing = repos.listings().find_by_id(7).await?;
//!     let booked = repos.reservations().find_blocking_for_listing(7).await?;
//! }
//! ```

use super::listing::ListingRepository;
use super::reservation::ReservationRepository;

pub trait RepositoryProvider: Send + Sync {
    fn listings(&self) -> &dyn ListingRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}
