//! Listing DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Listing;

/// Listing details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ListingDto {
    pub id: i32,
    pub owner_id: String,
    pub title: String,
    #[schema(value_type = String)]
    pub nightly_price: Decimal,
    pub currency: String,
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Listing> for ListingDto {
    fn from(l: Listing) -> Self {
        Self {
            id: l.id,
            owner_id: l.owner_id,
            title: l.title,
            nightly_price: l.nightly_price,
            currency: l.currency,
            max_guests: l.max_guests,
            created_at: l.created_at,
        }
    }
}

/// Request to publish a new listing
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, message = "owner_id is required"))]
    pub owner_id: String,
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    #[schema(value_type = String)]
    pub nightly_price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[validate(range(min = 1, max = 50, message = "max_guests must be between 1 and 50"))]
    pub max_guests: i32,
}

fn default_currency() -> String {
    "MAD".to_string()
}

/// One booked range, for disabling calendar days
#[derive(Debug, Serialize, ToSchema)]
pub struct BookedRangeDto {
    /// First booked night (inclusive)
    pub start: NaiveDate,
    /// Check-out day (exclusive); this day itself is bookable
    pub end: NaiveDate,
}
