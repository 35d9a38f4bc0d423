//! HTTP REST API interfaces
//!
//! - `common`: Response envelope, error mapping, validated JSON extractor
//! - `modules`: Request handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiState};
