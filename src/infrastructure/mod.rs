//! External concerns: database connection, entities, migrations and
//! repository implementations.

pub mod database;
pub mod storage;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, DatabaseConfig};
