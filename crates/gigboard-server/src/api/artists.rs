use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use gigboard_db::entities::artist;
use gigboard_db::search::{self, SearchResults};
use gigboard_db::views::{ArtistDetail, ArtistSummary};
use gigboard_db::{artists, AppState, EntityKind};
use std::sync::Arc;

use super::error::{catalog_error, record_id, validation_error, ApiError};
use crate::forms::{self, FormData};

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistSummary>>, ApiError> {
    let artists = artists::list(&state.db)
        .await
        .map_err(|e| catalog_error(e, "Artists could not be loaded.".into()))?;
    Ok(Json(artists))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SearchResults>, ApiError> {
    let term = forms::search_term(&FormData::parse(&body));
    let results = search::search(&state.db, EntityKind::Artist, &term, Utc::now())
        .await
        .map_err(|e| catalog_error(e, "Artist search failed.".into()))?;
    Ok(Json(results))
}

/// GET /artists/{id}
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let id = record_id(path, "artist")?;
    let detail = artists::detail(&state.db, id, Utc::now())
        .await
        .map_err(|e| catalog_error(e, format!("Artist {id} could not be loaded.")))?;
    Ok(Json(detail))
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<artist::Model>), ApiError> {
    let input = forms::artist_input(&FormData::parse(&body)).map_err(validation_error)?;
    let name = input.name.clone();

    let created = artists::create(&state.db, input)
        .await
        .map_err(|e| catalog_error(e, format!("Artist {name} could not be listed.")))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /artists/{id}/edit
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<artist::Model>, ApiError> {
    let id = record_id(path, "artist")?;
    let artist = artists::find(&state.db, id)
        .await
        .map_err(|e| catalog_error(e, format!("Artist {id} could not be loaded.")))?;
    Ok(Json(artist))
}

/// POST /artists/{id}/edit
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    body: Bytes,
) -> Result<Json<artist::Model>, ApiError> {
    let id = record_id(path, "artist")?;
    let input = forms::artist_input(&FormData::parse(&body)).map_err(validation_error)?;
    let name = input.name.clone();

    let updated = artists::update(&state.db, id, input)
        .await
        .map_err(|e| catalog_error(e, format!("Artist {name} could not be updated.")))?;
    Ok(Json(updated))
}

/// DELETE /artists/{id}
pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = record_id(path, "artist")?;
    artists::delete(&state.db, id, state.delete_policy)
        .await
        .map_err(|e| catalog_error(e, format!("Artist {id} could not be deleted.")))?;
    Ok(StatusCode::NO_CONTENT)
}
