//! Axum extractors for the authenticated user
//!
//! The upstream layer either inserts an [`AuthenticatedUser`] request
//! extension or forwards the identity as trusted gateway headers.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::context::AuthenticatedUser;
use crate::error::AuthError;

/// Header carrying the authenticated user's id
pub const USER_ID_HEADER: &str = "x-authenticated-user-id";

/// Header carrying the authenticated user's role id
pub const USER_TYPE_HEADER: &str = "x-authenticated-user-type";

/// Authenticated user extractor
#[derive(Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(user.clone()));
        }

        let user = from_headers(&parts.headers)?;
        tracing::trace!(user_id = user.user_id, "Authenticated user from gateway headers");
        Ok(AuthUser(user))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, AuthError> {
    headers
        .get(name)
        .map(|v| v.to_str().map(str::trim).map_err(|_| AuthError::InvalidHeader))
        .transpose()
}

fn from_headers(headers: &HeaderMap) -> Result<AuthenticatedUser, AuthError> {
    let user_id = header_str(headers, USER_ID_HEADER)?
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingAuthenticatedUser)?
        .parse::<i64>()
        .map_err(|_| AuthError::InvalidUserId)?;

    let user_type = header_str(headers, USER_TYPE_HEADER)?
        .ok_or(AuthError::MissingAuthenticatedUser)?;

    Ok(AuthenticatedUser::new(user_id, user_type))
}
