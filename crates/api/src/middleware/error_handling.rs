//! Error-to-response mapping.
//!
//! Every failure in a handler funnels through [`AppError`], which turns the
//! domain error into a status code plus a `{"error": ...}` JSON body. No
//! error is ever fatal to the process: each one becomes a response and the
//! server keeps serving.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wakesync_core::errors::AlarmError;

/// Wrapper that gives `AlarmError` an HTTP shape.
///
/// Handlers return `Result<_, AppError>` so `?` works directly on anything
/// that converts into the domain error.
#[derive(Debug)]
pub struct AppError(pub AlarmError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AlarmError::NotFound(_) => StatusCode::NOT_FOUND,
            AlarmError::Validation(_) => StatusCode::BAD_REQUEST,
            AlarmError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AlarmError::Authorization(_) => StatusCode::FORBIDDEN,
            AlarmError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AlarmError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<AlarmError> for AppError {
    fn from(err: AlarmError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `eyre::Report`; wrap them in the database
/// variant so they can bubble up through `?`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(AlarmError::Database(err))
    }
}

/// Builds the response for an error outside the `?` flow, e.g. in tests
/// asserting on status codes.
pub fn map_error(err: AlarmError) -> Response {
    AppError(err).into_response()
}
