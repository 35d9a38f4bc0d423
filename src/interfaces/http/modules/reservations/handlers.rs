//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::application::{BookingRequest, ReservationService};
use crate::domain::{GuestInfo, ReservationStatus};
use crate::interfaces::http::common::{error_reply, ApiResponse, EmptyData, ValidatedJson};

use super::dto::{
    CreateReservationRequest, ReservationDto, ReservationListQuery, UpdateStatusRequest,
};

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub reservations: Arc<ReservationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation created in Pending", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Listing not found"),
        (status = 409, description = "Dates unavailable"),
        (status = 422, description = "Field validation failed")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let booking = BookingRequest {
        listing_id: request.listing_id,
        start: request.start_date,
        end: request.end_date,
        guest_count: request.guest_count,
        guest: GuestInfo {
            full_name: request.full_name,
            phone: request.phone,
            address: request.address,
        },
    };

    match state.reservations.create(booking).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(reservation.into()))),
        Err(e) => Err(error_reply(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ReservationListQuery),
    responses(
        (status = 200, description = "Reservations", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(query): Query<ReservationListQuery>,
) -> Result<
    Json<ApiResponse<Vec<ReservationDto>>>,
    (StatusCode, Json<ApiResponse<Vec<ReservationDto>>>),
> {
    let result = match query.listing_id {
        Some(listing_id) => state.reservations.list_for_listing(listing_id).await,
        None => state.reservations.list().await,
    };

    match result {
        Ok(reservations) => Ok(Json(ApiResponse::success(
            reservations.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(error_reply(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    match state.reservations.get(id).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(reservation.into()))),
        Err(e) => Err(error_reply(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/status",
    tag = "Reservations",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Illegal transition or dates no longer available")
    )
)]
pub async fn set_reservation_status(
    State(state): State<ReservationAppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let Some(target) = ReservationStatus::parse(&request.status) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown status '{}'",
                request.status
            ))),
        ));
    };

    match state.reservations.transition(id, target).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(reservation.into()))),
        Err(e) => Err(error_reply(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    match state.reservations.delete(id).await {
        Ok(()) => Ok(Json(ApiResponse::success(EmptyData {}))),
        Err(e) => Err(error_reply(e)),
    }
}
