//! Request boundary helpers: path names and JSON bodies

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// User name taken from the `{name}` path segment.
///
/// A single leading `/` is stripped; some routers hand the captured
/// segment over with it attached.
pub struct UserName(pub String);

impl<S> FromRequestParts<S> for UserName
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(name): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                message: e.body_text(),
            })?;

        Ok(Self(strip_leading_slash(&name).to_owned()))
    }
}

pub fn strip_leading_slash(name: &str) -> &str {
    name.strip_prefix('/').unwrap_or(name)
}

/// Parse a JSON request body regardless of its `Content-Type`.
///
/// Handlers call this after their existence check so a missing user wins
/// over a malformed body.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest {
        message: e.to_string(),
    })
}
