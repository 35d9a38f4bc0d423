//! # Atlas Stays
//!
//! Reservation service for a short-term-rental marketplace: listing
//! catalog, availability queries and a conflict-safe booking lifecycle.
//!
//! ## Architecture
//!
//! - **domain**: Core business entities, errors and repository traits
//! - **application**: Availability index, conflict resolver and the
//!   reservation lifecycle controller
//! - **infrastructure**: Database connection, entities, migrations and
//!   repository implementations (SeaORM + in-memory)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
