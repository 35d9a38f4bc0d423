pub mod model;
pub mod repository;

pub use model::{GuestInfo, Reservation, ReservationStatus};
pub use repository::ReservationRepository;
