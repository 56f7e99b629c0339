//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No user context was attached upstream
    MissingAuthenticatedUser,
    /// `x-authenticated-user-id` is not an integer
    InvalidUserId,
    /// A context header is not valid visible ASCII
    InvalidHeader,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingAuthenticatedUser => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHENTICATED_USER",
                "Authenticated user context required",
            ),
            AuthError::InvalidUserId => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHENTICATED_USER",
                "Invalid authenticated user id",
            ),
            AuthError::InvalidHeader => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHENTICATED_USER",
                "Invalid authenticated user header",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
