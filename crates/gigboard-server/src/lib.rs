use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use gigboard_db::AppState;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod forms;

/// Build the application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(api::healthz))
        // Venues
        .route("/venues", get(api::venues::list_venues))
        .route("/venues/search", post(api::venues::search_venues))
        .route("/venues/create", post(api::venues::create_venue))
        .route(
            "/venues/{id}",
            get(api::venues::get_venue).delete(api::venues::delete_venue),
        )
        .route(
            "/venues/{id}/edit",
            get(api::venues::edit_venue_form).post(api::venues::update_venue),
        )
        // Artists
        .route("/artists", get(api::artists::list_artists))
        .route("/artists/search", post(api::artists::search_artists))
        .route("/artists/create", post(api::artists::create_artist))
        .route(
            "/artists/{id}",
            get(api::artists::get_artist).delete(api::artists::delete_artist),
        )
        .route(
            "/artists/{id}/edit",
            get(api::artists::edit_artist_form).post(api::artists::update_artist),
        )
        // Shows
        .route("/shows", get(api::shows::list_shows))
        .route("/shows/create", post(api::shows::create_show))
        .fallback(api::error::not_found)
        .layer(TraceLayer::new_for_http())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
