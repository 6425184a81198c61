//! Appointment handlers: book, list, cancel, reschedule.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Appointment, AppointmentKind, AppointmentView};
use crate::errors::AppResult;
use crate::services::{BookAppointment, RescheduleAppointment};
use crate::types::NoContent;

/// Booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookAppointmentRequest {
    /// Slot to book
    pub slot_id: Uuid,
    /// Appointment category
    pub appointment_type: AppointmentKind,
    /// Free-text comments for the provider
    #[serde(default)]
    #[schema(example = "First visit, referred by Dr. Lee")]
    pub comments: String,
}

/// Reschedule request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RescheduleRequest {
    /// New slot to move the booking to
    pub new_slot_id: Uuid,
    /// Appointment category
    pub appointment_type: AppointmentKind,
    /// Free-text comments for the provider
    #[serde(default)]
    pub comments: String,
}

/// Listing filter
#[derive(Debug, Deserialize)]
pub struct AppointmentFilters {
    /// Only future-dated slots
    #[serde(default)]
    pub upcoming: bool,
}

/// Create appointment routes
pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(my_appointments).post(book_appointment))
        .route("/:appointment_id", axum::routing::delete(cancel_appointment))
        .route("/:appointment_id/reschedule", put(reschedule_appointment))
}

/// Book an available slot
#[utoipa::path(
    post,
    path = "/appointments",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    request_body = BookAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 403, description = "Providers cannot book"),
        (status = 404, description = "Slot missing or unavailable"),
        (status = 409, description = "Slot was claimed concurrently")
    )
)]
pub async fn book_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<BookAppointmentRequest>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let appointment = state
        .appointment_service
        .book(
            user.actor(),
            BookAppointment {
                slot_id: payload.slot_id,
                kind: payload.appointment_type,
                comments: payload.comments,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// List the actor's appointments
#[utoipa::path(
    get,
    path = "/appointments",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(
        ("upcoming" = Option<bool>, Query, description = "Only future-dated slots")
    ),
    responses(
        (status = 200, description = "Appointments with their slots", body = [AppointmentView])
    )
)]
pub async fn my_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(filters): Query<AppointmentFilters>,
) -> AppResult<Json<Vec<AppointmentView>>> {
    let appointments = state
        .appointment_service
        .my_appointments(user.actor(), filters.upcoming)
        .await?;
    Ok(Json(appointments))
}

/// Cancel a booking
#[utoipa::path(
    delete,
    path = "/appointments/{appointment_id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("appointment_id" = Uuid, Path, description = "Appointment id")),
    responses(
        (status = 204, description = "Appointment cancelled; slot freed"),
        (status = 403, description = "Not the booking user or owning provider"),
        (status = 404, description = "No such appointment")
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(appointment_id): Path<Uuid>,
) -> AppResult<NoContent> {
    state
        .appointment_service
        .cancel(user.actor(), appointment_id)
        .await?;
    Ok(NoContent)
}

/// Move a booking to a different available slot
#[utoipa::path(
    put,
    path = "/appointments/{appointment_id}/reschedule",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("appointment_id" = Uuid, Path, description = "Appointment id")),
    request_body = RescheduleRequest,
    responses(
        (status = 200, description = "Appointment rescheduled", body = Appointment),
        (status = 400, description = "New slot equals the current one"),
        (status = 404, description = "Appointment or new slot missing/unavailable"),
        (status = 409, description = "New slot was claimed concurrently")
    )
)]
pub async fn reschedule_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(appointment_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RescheduleRequest>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .appointment_service
        .reschedule(
            user.actor(),
            appointment_id,
            RescheduleAppointment {
                new_slot_id: payload.new_slot_id,
                kind: payload.appointment_type,
                comments: payload.comments,
            },
        )
        .await?;

    Ok(Json(appointment))
}
