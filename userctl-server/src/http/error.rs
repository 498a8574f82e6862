//! API error types with IntoResponse
//!
//! Errors become a plain-text message plus status code. There is no
//! structured error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::StoreError;

pub const USER_NOT_FOUND: &str = "User not found";
pub const USERNAME_EXISTS: &str = "Username already exists";
pub const UPDATE_NAME_EXISTS: &str = "Failed to update user - That name already exists";
pub const CREATE_FAILED: &str = "Failed to create user";
pub const UPDATE_FAILED: &str = "Failed to update user";
pub const DELETE_FAILED: &str = "Failed to delete user";
pub const INTERNAL: &str = "Internal Server Error";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body is not valid JSON for the operation (400)
    BadRequest { message: String },

    /// No row matches the path name (404)
    NotFound,

    /// Create would duplicate an existing name (400)
    Conflict,

    /// Rename target is already taken (500)
    NameTaken,

    /// Storage failure (500, logged)
    Store {
        context: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    /// Wrap a storage failure with the message the client should see.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } | Self::Conflict => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NameTaken | Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest { message } => message,
            Self::NotFound => USER_NOT_FOUND.to_owned(),
            Self::Conflict => USERNAME_EXISTS.to_owned(),
            Self::NameTaken => UPDATE_NAME_EXISTS.to_owned(),
            Self::Store { context, source } => {
                // Log the actual error, return the generic message
                tracing::error!(error = %source, "{}", context);
                context.to_owned()
            }
        };

        (status, message).into_response()
    }
}
