//! SeaORM repository implementations

pub mod listing_repository;
pub mod repository_provider;
pub mod reservation_repository;

pub use listing_repository::SeaOrmListingRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
