//! Listing domain entity
//!
//! A rentable property/unit. Referenced by reservations; immutable for
//! the reservation core beyond price and occupancy lookups.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct Listing {
    pub id: i32,
    /// Owner (host) identifier, issued by the external identity service
    pub owner_id: String,
    pub title: String,
    /// Price for one night
    pub nightly_price: Decimal,
    /// ISO currency code, e.g. "MAD"
    pub currency: String,
    /// Maximum occupancy enforced at booking time
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(
        id: i32,
        owner_id: impl Into<String>,
        title: impl Into<String>,
        nightly_price: Decimal,
        currency: impl Into<String>,
        max_guests: i32,
    ) -> Self {
        Self {
            id,
            owner_id: owner_id.into(),
            title: title.into(),
            nightly_price,
            currency: currency.into(),
            max_guests,
            created_at: Utc::now(),
        }
    }
}
