//! Reservation API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use crate::api::dto::{ApiResponse, ReservationRequest, ReservationResponse};
use crate::api::validated_json::ValidatedJson;
use crate::application::services::ReservationService;
use crate::domain::DomainError;

/// Reservation handler state
#[derive(Clone)]
pub struct ReservationAppState {
    pub service: Arc<ReservationService>,
}

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

/// Create a reservation
///
/// Cash reservations confirm immediately; credit-card reservations are
/// verified synchronously against the card-payment service; bank-transfer
/// reservations stay pending until the payment update arrives.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/confirm",
    tag = "Reservations",
    request_body = ReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationResponse),
        (status = 400, description = "Invalid request or payment declined", body = ApiResponse<String>),
        (status = 422, description = "Field validation failed", body = ApiResponse<String>),
        (status = 500, description = "Internal error", body = ApiResponse<String>)
    )
)]
pub async fn confirm_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<ReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), HandlerError> {
    let command = request.into_command().map_err(into_response_error)?;

    let saved = state
        .service
        .confirm_reservation(command)
        .await
        .map_err(into_response_error)?;

    let Some(id) = saved.id else {
        error!("stored reservation came back without an id");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("internal server error")),
        ));
    };

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from_domain(id, &saved)),
    ))
}

fn into_response_error(e: DomainError) -> HandlerError {
    match e {
        DomainError::Validation(_) | DomainError::PaymentDeclined { .. } => {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string())))
        }
        DomainError::Storage(_) => {
            error!(error = %e, "reservation creation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("internal server error")),
            )
        }
    }
}
