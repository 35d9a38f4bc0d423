//! Listing repository interface

use async_trait::async_trait;

use super::model::Listing;
use crate::domain::DomainResult;

#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Save a new listing
    async fn save(&self, listing: Listing) -> DomainResult<()>;

    /// Find listing by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Listing>>;

    /// All listings, newest first
    async fn find_all(&self) -> DomainResult<Vec<Listing>>;

    /// Hard delete (administrative). Errors with NotFound if absent.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Generate next listing ID. Storage failures propagate; callers
    /// must not fall back to a default id.
    async fn next_id(&self) -> DomainResult<i32>;
}
