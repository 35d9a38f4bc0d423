pub mod error;
pub mod listing;
pub mod repositories;
pub mod reservation;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use listing::{Listing, ListingRepository};
pub use repositories::RepositoryProvider;
pub use reservation::{GuestInfo, Reservation, ReservationRepository, ReservationStatus};
