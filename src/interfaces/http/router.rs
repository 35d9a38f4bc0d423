//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ListingService, ReservationService};
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::modules::health::handlers as health;
use crate::interfaces::http::modules::listings::handlers as listings;
use crate::interfaces::http::modules::listings::{dto as listing_dto, ListingAppState};
use crate::interfaces::http::modules::reservations::handlers as reservations;
use crate::interfaces::http::modules::reservations::{dto as reservation_dto, ReservationAppState};

/// Unified state for all routes. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub listings: Arc<ListingService>,
    pub reservations: Arc<ReservationService>,
}

impl FromRef<ApiState> for ListingAppState {
    fn from_ref(s: &ApiState) -> Self {
        ListingAppState {
            listings: Arc::clone(&s.listings),
            reservations: Arc::clone(&s.reservations),
        }
    }
}

impl FromRef<ApiState> for ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationAppState {
            reservations: Arc::clone(&s.reservations),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Listings
        listings::create_listing,
        listings::list_listings,
        listings::get_listing,
        listings::delete_listing,
        listings::get_availability,
        // Reservations
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::set_reservation_status,
        reservations::delete_reservation,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            EmptyData,
            // Health
            health::HealthResponse,
            // Listings
            listing_dto::ListingDto,
            listing_dto::CreateListingRequest,
            listing_dto::BookedRangeDto,
            // Reservations
            reservation_dto::ReservationDto,
            reservation_dto::CreateReservationRequest,
            reservation_dto::UpdateStatusRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Listings", description = "Listing catalog and availability"),
        (name = "Reservations", description = "Booking lifecycle")
    )
)]
pub struct ApiDoc;

/// Build the REST API router
pub fn create_api_router(
    listings: Arc<ListingService>,
    reservations: Arc<ReservationService>,
) -> Router {
    let state = ApiState {
        listings,
        reservations,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let listing_routes = Router::new()
        .route(
            "/",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route(
            "/{id}",
            get(listings::get_listing).delete(listings::delete_listing),
        )
        .route("/{id}/availability", get(listings::get_availability))
        .with_state(state.clone());

    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/{id}",
            get(reservations::get_reservation).delete(reservations::delete_reservation),
        )
        .route("/{id}/status", put(reservations::set_reservation_status))
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/api/v1/health", get(health::health_check))
        .nest("/api/v1/listings", listing_routes)
        .nest("/api/v1/reservations", reservation_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
