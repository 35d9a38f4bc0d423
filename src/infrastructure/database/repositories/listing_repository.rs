//! SeaORM implementation of ListingRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::listing::{Listing, ListingRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::listing;

pub struct SeaOrmListingRepository {
    db: DatabaseConnection,
}

impl SeaOrmListingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: listing::Model) -> Listing {
    Listing {
        id: m.id,
        owner_id: m.owner_id,
        title: m.title,
        nightly_price: m.nightly_price,
        currency: m.currency,
        max_guests: m.max_guests,
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl ListingRepository for SeaOrmListingRepository {
    async fn save(&self, l: Listing) -> DomainResult<()> {
        debug!("Saving listing: {}", l.id);

        let model = listing::ActiveModel {
            id: Set(l.id),
            owner_id: Set(l.owner_id),
            title: Set(l.title),
            nightly_price: Set(l.nightly_price),
            currency: Set(l.currency),
            max_guests: Set(l.max_guests),
            created_at: Set(l.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Listing>> {
        let model = listing::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Listing>> {
        let models = listing::Entity::find()
            .order_by_desc(listing::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let existing = listing::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Listing",
                field: "id",
                value: id.to_string(),
            });
        };

        existing.delete(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn next_id(&self) -> DomainResult<i32> {
        // Highest existing id + 1. A racing allocation of the same id is
        // caught by the primary-key constraint on insert.
        let top = listing::Entity::find()
            .order_by_desc(listing::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(top.map(|l| l.id).unwrap_or(0) + 1)
    }
}
