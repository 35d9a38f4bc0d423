//! Business logic: availability queries, conflict resolution and the
//! reservation lifecycle, plus listing CRUD.

pub mod availability;
pub mod conflict;
pub mod listings;
pub mod locks;
pub mod reservations;

pub use availability::AvailabilityIndex;
pub use conflict::ConflictResolver;
pub use listings::{ListingService, NewListing};
pub use reservations::{BookingRequest, ReservationService};
