pub mod artists;
pub mod error;
pub mod shows;
pub mod venues;

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /healthz
pub async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
