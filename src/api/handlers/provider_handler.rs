//! Provider directory handlers: browse and provider detail pages.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::{ProviderProfile, Specialty};
use crate::errors::AppResult;
use crate::services::ProviderPage;
use crate::types::{Paginated, PaginationParams};

/// Directory browse filters
#[derive(Debug, Deserialize)]
pub struct BrowseFilters {
    /// Narrow by specialization
    pub specialty: Option<Specialty>,
    /// Substring matched against any address field
    pub address: Option<String>,
}

/// Create provider directory routes
pub fn provider_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(browse_providers))
        .route("/:provider_id", get(provider_detail))
}

/// Browse providers by specialization and address
#[utoipa::path(
    get,
    path = "/providers",
    tag = "Providers",
    security(("bearer_auth" = [])),
    params(
        ("specialty" = Option<Specialty>, Query, description = "Narrow by specialization"),
        ("address" = Option<String>, Query, description = "Substring matched against address fields"),
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Matching providers")
    )
)]
pub async fn browse_providers(
    State(state): State<AppState>,
    Query(filters): Query<BrowseFilters>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ProviderProfile>>> {
    let providers = state
        .provider_service
        .browse(filters.specialty, filters.address)
        .await?;

    Ok(Json(Paginated::from_items(providers, &pagination)))
}

/// A provider's public page with published slots
#[utoipa::path(
    get,
    path = "/providers/{provider_id}",
    tag = "Providers",
    security(("bearer_auth" = [])),
    params(("provider_id" = Uuid, Path, description = "Provider account id")),
    responses(
        (status = 200, description = "Provider page", body = ProviderPage),
        (status = 404, description = "No such provider")
    )
)]
pub async fn provider_detail(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> AppResult<Json<ProviderPage>> {
    let page = state.provider_service.detail(provider_id).await?;
    Ok(Json(page))
}
