//! Reservation DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Reservation;

/// Request to book a listing for `[start_date, end_date)`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    pub listing_id: i32,
    /// Check-in date (inclusive)
    pub start_date: NaiveDate,
    /// Check-out date (exclusive)
    pub end_date: NaiveDate,
    #[validate(range(min = 1, message = "guest_count must be positive"))]
    pub guest_count: i32,
    #[validate(length(min = 1, max = 100, message = "full_name is required"))]
    pub full_name: String,
    #[validate(length(min = 5, max = 30, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, max = 300, message = "address is required"))]
    pub address: String,
}

/// Request to move a reservation along its lifecycle
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status: Confirmed, Cancelled or Completed
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

/// Optional filters for listing reservations
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ReservationListQuery {
    /// Restrict to one listing
    pub listing_id: Option<i32>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: Uuid,
    pub listing_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub nights: i64,
    pub guest_count: i32,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub status: String,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        let nights = r.nights();
        Self {
            id: r.id,
            listing_id: r.listing_id,
            start_date: r.start,
            end_date: r.end,
            nights,
            guest_count: r.guest_count,
            full_name: r.guest.full_name,
            phone: r.guest.phone,
            address: r.guest.address,
            status: r.status.as_str().to_string(),
            total_price: r.total_price,
            created_at: r.created_at,
        }
    }
}
