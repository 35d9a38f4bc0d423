//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub listing_id: i32,

    /// Check-in (inclusive)
    pub start_date: Date,
    /// Check-out (exclusive)
    pub end_date: Date,

    pub guest_count: i32,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_address: String,

    /// Reservation status: Pending, Confirmed, Cancelled, Completed
    pub status: String,

    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub total_price: Decimal,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::listing::Entity",
        from = "Column::ListingId",
        to = "super::listing::Column::Id"
    )]
    Listing,
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
