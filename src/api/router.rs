//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{ApiResponse, ReservationRequest, ReservationResponse};
use crate::api::handlers::{health, reservations};
use crate::api::handlers::reservations::ReservationAppState;
use crate::application::services::ReservationService;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        reservations::confirm_reservation,
    ),
    components(schemas(
        health::HealthResponse,
        ReservationRequest,
        ReservationResponse,
        ApiResponse<String>,
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Reservations", description = "Room reservation lifecycle"),
    ),
    info(
        title = "Room Reservation Service API",
        description = "Creates room reservations and reports their payment-driven status."
    )
)]
struct ApiDoc;

/// Build the REST API router.
pub fn create_api_router(service: Arc<ReservationService>) -> Router {
    let state = ReservationAppState { service };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/v1/reservations/confirm",
            post(reservations::confirm_reservation),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
