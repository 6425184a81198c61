//! Slot handlers: publishing, listing, and deleting time slots.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::TimeSlot;
use crate::errors::AppResult;
use crate::services::RecurringSlots;
use crate::types::NoContent;

/// Single slot publication request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSlotRequest {
    /// Window start
    pub start_time: DateTime<Utc>,
    /// Window end
    pub end_time: DateTime<Utc>,
}

/// Recurring slot publication request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRecurringSlotsRequest {
    /// Daily window start, e.g. "10:00"
    #[schema(example = "10:00:00")]
    pub start_time_of_day: NaiveTime,
    /// Daily window end, e.g. "11:00"
    #[schema(example = "11:00:00")]
    pub end_time_of_day: NaiveTime,
    /// Full weekday names ("Monday" .. "Sunday")
    #[validate(length(min = 1, message = "Select at least one weekday"))]
    pub weekdays: Vec<String>,
    /// How many weeks to repeat, starting this week
    #[validate(range(min = 1, message = "Number of weeks must be at least 1"))]
    #[schema(example = 2)]
    pub num_weeks: u32,
}

/// Slot listing filters
#[derive(Debug, Deserialize)]
pub struct SlotFilters {
    /// Narrow to one provider
    pub provider: Option<Uuid>,
    /// Narrow to one calendar day
    pub date: Option<NaiveDate>,
}

/// Create slot routes
pub fn slot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_slots).post(create_slot))
        .route("/recurring", post(create_recurring_slots))
        .route("/mine", get(my_slots))
        .route("/:slot_id", axum::routing::delete(delete_slot))
}

/// List available slots by provider and date
#[utoipa::path(
    get,
    path = "/slots",
    tag = "Slots",
    security(("bearer_auth" = [])),
    params(
        ("provider" = Option<Uuid>, Query, description = "Narrow to one provider"),
        ("date" = Option<NaiveDate>, Query, description = "Narrow to one calendar day")
    ),
    responses(
        (status = 200, description = "Available slots", body = [TimeSlot])
    )
)]
pub async fn list_slots(
    State(state): State<AppState>,
    Query(filters): Query<SlotFilters>,
) -> AppResult<Json<Vec<TimeSlot>>> {
    let slots = state
        .slot_service
        .list_available(filters.provider, filters.date)
        .await?;
    Ok(Json(slots))
}

/// Publish a single slot
#[utoipa::path(
    post,
    path = "/slots",
    tag = "Slots",
    security(("bearer_auth" = [])),
    request_body = CreateSlotRequest,
    responses(
        (status = 201, description = "Slot published", body = TimeSlot),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Only providers publish slots")
    )
)]
pub async fn create_slot(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateSlotRequest>,
) -> AppResult<(StatusCode, Json<TimeSlot>)> {
    let slot = state
        .slot_service
        .publish(user.actor(), payload.start_time, payload.end_time)
        .await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

/// Publish a recurring series of slots
#[utoipa::path(
    post,
    path = "/slots/recurring",
    tag = "Slots",
    security(("bearer_auth" = [])),
    request_body = CreateRecurringSlotsRequest,
    responses(
        (status = 201, description = "Slots published", body = [TimeSlot]),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Only providers publish slots")
    )
)]
pub async fn create_recurring_slots(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateRecurringSlotsRequest>,
) -> AppResult<(StatusCode, Json<Vec<TimeSlot>>)> {
    let slots = state
        .slot_service
        .publish_recurring(
            user.actor(),
            RecurringSlots {
                start_time_of_day: payload.start_time_of_day,
                end_time_of_day: payload.end_time_of_day,
                weekdays: payload.weekdays,
                num_weeks: payload.num_weeks,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(slots)))
}

/// The acting provider's own slots
#[utoipa::path(
    get,
    path = "/slots/mine",
    tag = "Slots",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own slots", body = [TimeSlot]),
        (status = 403, description = "Only providers own slots")
    )
)]
pub async fn my_slots(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<TimeSlot>>> {
    let slots = state.slot_service.my_slots(user.actor()).await?;
    Ok(Json(slots))
}

/// Delete an owned slot, cancelling any bookings against it
#[utoipa::path(
    delete,
    path = "/slots/{slot_id}",
    tag = "Slots",
    security(("bearer_auth" = [])),
    params(("slot_id" = Uuid, Path, description = "Slot id")),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 403, description = "Not the owning provider"),
        (status = 404, description = "No such slot")
    )
)]
pub async fn delete_slot(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(slot_id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.slot_service.delete(user.actor(), slot_id).await?;
    Ok(NoContent)
}
