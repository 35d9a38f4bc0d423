pub mod health;
pub mod listings;
pub mod reservations;
