//! Listing service
//!
//! Thin CRUD over the listing store. Stands in for the external listing
//! collaborator the reservation core looks prices and occupancy up from.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{DomainError, DomainResult, Listing, RepositoryProvider};

#[derive(Debug, Clone)]
pub struct NewListing {
    pub owner_id: String,
    pub title: String,
    pub nightly_price: Decimal,
    pub currency: String,
    pub max_guests: i32,
}

pub struct ListingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ListingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, new: NewListing) -> DomainResult<Listing> {
        if new.title.trim().is_empty() || new.owner_id.trim().is_empty() {
            return Err(DomainError::validation("title and owner_id are required"));
        }
        if new.nightly_price <= Decimal::ZERO {
            return Err(DomainError::validation("nightly_price must be positive"));
        }
        if new.max_guests < 1 {
            return Err(DomainError::validation("max_guests must be at least 1"));
        }

        let id = self.repos.listings().next_id().await?;
        let listing = Listing::new(
            id,
            new.owner_id,
            new.title,
            new.nightly_price,
            new.currency,
            new.max_guests,
        );
        self.repos.listings().save(listing.clone()).await?;
        info!(listing_id = id, "Listing created");
        Ok(listing)
    }

    pub async fn get(&self, id: i32) -> DomainResult<Listing> {
        self.repos
            .listings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Listing",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn list(&self) -> DomainResult<Vec<Listing>> {
        self.repos.listings().find_all().await
    }

    /// Moderation delete. Refused while the listing still has blocking
    /// reservations; those must be cancelled or deleted first.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let blocking = self
            .repos
            .reservations()
            .find_blocking_for_listing(id)
            .await?;
        if let Some(first) = blocking.first() {
            return Err(DomainError::RangeConflict {
                reservation_id: first.id,
            });
        }

        self.repos.listings().delete(id).await?;
        info!(listing_id = id, "Listing deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
