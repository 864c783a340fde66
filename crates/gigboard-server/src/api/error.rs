//! Mapping of catalog failures onto HTTP responses.

use axum::{
    extract::{rejection::PathRejection, Path},
    http::StatusCode,
    Json,
};
use gigboard_db::CatalogError;
use serde::Serialize;

use crate::forms::FieldError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            fields: Vec::new(),
        }),
    )
}

pub fn validation_error(fields: Vec<FieldError>) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: "Please correct the highlighted fields.".to_string(),
            fields,
        }),
    )
}

/// Turn a catalog error into a response.
///
/// `failure` describes what could not be done, e.g. "Venue X could not be
/// listed." Storage errors are logged and only `failure` reaches the client.
pub fn catalog_error(err: CatalogError, failure: String) -> ApiError {
    match err {
        CatalogError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, err.to_string()),
        CatalogError::MissingReference { entity, .. } => {
            validation_error(vec![FieldError::new(&format!("{entity}_id"), err.to_string())])
        }
        CatalogError::HasDependents { .. } => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        CatalogError::Database(e) => {
            tracing::error!(error = %e, "{failure}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred. {failure}"),
            )
        }
    }
}

/// Take the record id out of the path. An id that does not parse as a
/// record key cannot name a record and is answered with a 404.
pub fn record_id(path: Result<Path<i32>, PathRejection>, entity: &str) -> Result<i32, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "{entity} id rejected");
            Err(error_response(
                StatusCode::NOT_FOUND,
                format!("{entity} not found"),
            ))
        }
    }
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
