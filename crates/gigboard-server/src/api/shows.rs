use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use gigboard_db::entities::show;
use gigboard_db::views::ShowListing;
use gigboard_db::{shows, AppState};
use std::sync::Arc;

use super::error::{catalog_error, validation_error, ApiError};
use crate::forms::{self, FormData};

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, ApiError> {
    let listing = shows::list(&state.db)
        .await
        .map_err(|e| catalog_error(e, "Shows could not be loaded.".into()))?;
    Ok(Json(listing))
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<show::Model>), ApiError> {
    let input = forms::show_input(&FormData::parse(&body)).map_err(validation_error)?;

    let created = shows::create(&state.db, input)
        .await
        .map_err(|e| catalog_error(e, "Show could not be listed.".into()))?;
    Ok((StatusCode::CREATED, Json(created)))
}
