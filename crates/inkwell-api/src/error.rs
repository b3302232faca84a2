use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inkwell_types::Error;
use serde_json::json;
use tracing::error;

/// Boundary wrapper translating the domain taxonomy into HTTP responses.
/// Domain code never sees status codes; this is the only place the mapping
/// lives.
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Invalid input", "errors": errors })),
            )
                .into_response(),
            Error::BadRequest(msg) => respond(StatusCode::BAD_REQUEST, msg),
            Error::Conflict(msg) => respond(StatusCode::CONFLICT, msg),
            Error::NotFound(msg) => respond(StatusCode::NOT_FOUND, msg),
            Error::Unauthorized(msg) => respond(StatusCode::UNAUTHORIZED, msg),
            Error::Forbidden(msg) => respond(StatusCode::FORBIDDEN, msg),
            Error::Internal(err) => {
                // Detail is logged, never returned to the caller
                error!("Internal error: {:#}", err);
                respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

fn respond(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}
