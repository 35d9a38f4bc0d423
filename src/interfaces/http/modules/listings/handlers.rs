//! Listing HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::{ListingService, NewListing, ReservationService};
use crate::interfaces::http::common::{error_reply, ApiResponse, EmptyData, ValidatedJson};

use super::dto::{BookedRangeDto, CreateListingRequest, ListingDto};

/// Application state for listing handlers.
#[derive(Clone)]
pub struct ListingAppState {
    pub listings: Arc<ListingService>,
    pub reservations: Arc<ReservationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/listings",
    tag = "Listings",
    request_body = CreateListingRequest,
    responses(
        (status = 200, description = "Listing created", body = ApiResponse<ListingDto>),
        (status = 400, description = "Invalid data"),
        (status = 422, description = "Field validation failed")
    )
)]
pub async fn create_listing(
    State(state): State<ListingAppState>,
    ValidatedJson(request): ValidatedJson<CreateListingRequest>,
) -> Result<Json<ApiResponse<ListingDto>>, (StatusCode, Json<ApiResponse<ListingDto>>)> {
    let new = NewListing {
        owner_id: request.owner_id,
        title: request.title,
        nightly_price: request.nightly_price,
        currency: request.currency,
        max_guests: request.max_guests,
    };

    match state.listings.create(new).await {
        Ok(listing) => Ok(Json(ApiResponse::success(listing.into()))),
        Err(e) => Err(error_reply(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/listings",
    tag = "Listings",
    responses(
        (status = 200, description = "All listings", body = ApiResponse<Vec<ListingDto>>)
    )
)]
pub async fn list_listings(
    State(state): State<ListingAppState>,
) -> Result<Json<ApiResponse<Vec<ListingDto>>>, (StatusCode, Json<ApiResponse<Vec<ListingDto>>>)> {
    match state.listings.list().await {
        Ok(listings) => Ok(Json(ApiResponse::success(
            listings.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(error_reply(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    tag = "Listings",
    params(("id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing details", body = ApiResponse<ListingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_listing(
    State(state): State<ListingAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ListingDto>>, (StatusCode, Json<ApiResponse<ListingDto>>)> {
    match state.listings.get(id).await {
        Ok(listing) => Ok(Json(ApiResponse::success(listing.into()))),
        Err(e) => Err(error_reply(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    tag = "Listings",
    params(("id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Listing still has active reservations")
    )
)]
pub async fn delete_listing(
    State(state): State<ListingAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    match state.listings.delete(id).await {
        Ok(()) => Ok(Json(ApiResponse::success(EmptyData {}))),
        Err(e) => Err(error_reply(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}/availability",
    tag = "Listings",
    params(("id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Booked ranges, ordered by start date", body = ApiResponse<Vec<BookedRangeDto>>)
    )
)]
pub async fn get_availability(
    State(state): State<ListingAppState>,
    Path(id): Path<i32>,
) -> Result<
    Json<ApiResponse<Vec<BookedRangeDto>>>,
    (StatusCode, Json<ApiResponse<Vec<BookedRangeDto>>>),
> {
    match state.reservations.booked_ranges(id).await {
        Ok(ranges) => Ok(Json(ApiResponse::success(
            ranges
                .into_iter()
                .map(|(start, end)| BookedRangeDto { start, end })
                .collect(),
        ))),
        Err(e) => Err(error_reply(e)),
    }
}
