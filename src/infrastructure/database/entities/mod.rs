//! SeaORM entities

pub mod listing;
pub mod reservation;
