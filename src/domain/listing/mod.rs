pub mod model;
pub mod repository;

pub use model::Listing;
pub use repository::ListingRepository;
