use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use gigboard_db::entities::venue;
use gigboard_db::search::{self, SearchResults};
use gigboard_db::views::{AreaGroup, VenueDetail};
use gigboard_db::{venues, AppState, EntityKind};
use std::sync::Arc;

use super::error::{catalog_error, record_id, validation_error, ApiError};
use crate::forms::{self, FormData};

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AreaGroup>>, ApiError> {
    let groups = venues::listing(&state.db, Utc::now())
        .await
        .map_err(|e| catalog_error(e, "Venues could not be loaded.".into()))?;
    Ok(Json(groups))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SearchResults>, ApiError> {
    let term = forms::search_term(&FormData::parse(&body));
    let results = search::search(&state.db, EntityKind::Venue, &term, Utc::now())
        .await
        .map_err(|e| catalog_error(e, "Venue search failed.".into()))?;
    Ok(Json(results))
}

/// GET /venues/{id}
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<VenueDetail>, ApiError> {
    let id = record_id(path, "venue")?;
    let detail = venues::detail(&state.db, id, Utc::now())
        .await
        .map_err(|e| catalog_error(e, format!("Venue {id} could not be loaded.")))?;
    Ok(Json(detail))
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<venue::Model>), ApiError> {
    let input = forms::venue_input(&FormData::parse(&body)).map_err(validation_error)?;
    let name = input.name.clone();

    let created = venues::create(&state.db, input)
        .await
        .map_err(|e| catalog_error(e, format!("Venue {name} could not be listed.")))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /venues/{id}/edit
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<venue::Model>, ApiError> {
    let id = record_id(path, "venue")?;
    let venue = venues::find(&state.db, id)
        .await
        .map_err(|e| catalog_error(e, format!("Venue {id} could not be loaded.")))?;
    Ok(Json(venue))
}

/// POST /venues/{id}/edit
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    body: Bytes,
) -> Result<Json<venue::Model>, ApiError> {
    let id = record_id(path, "venue")?;
    let input = forms::venue_input(&FormData::parse(&body)).map_err(validation_error)?;
    let name = input.name.clone();

    let updated = venues::update(&state.db, id, input)
        .await
        .map_err(|e| catalog_error(e, format!("Venue {name} could not be updated.")))?;
    Ok(Json(updated))
}

/// DELETE /venues/{id}
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = record_id(path, "venue")?;
    venues::delete(&state.db, id, state.delete_policy)
        .await
        .map_err(|e| catalog_error(e, format!("Venue {id} could not be deleted.")))?;
    Ok(StatusCode::NO_CONTENT)
}
