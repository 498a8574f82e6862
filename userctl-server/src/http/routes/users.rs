//! User endpoints
//!
//! Each handler maps to one or two single-statement store calls. Update and
//! delete check existence first and then mutate without a transaction, so a
//! concurrent rename or delete can leave the mutation touching zero rows.
//! That case still answers 200; it is only logged.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};

use crate::db::{StoreError, UserStore};
use crate::http::error::{ApiError, CREATE_FAILED, DELETE_FAILED, INTERNAL, UPDATE_FAILED};
use crate::http::extractors::{parse_json, UserName};
use crate::http::server::AppState;
use crate::models::{User, UserPayload};

const CREATED: &str = "User created successfully";
const UPDATED: &str = "User updated successfully";
const DELETED: &str = "User deleted successfully";

/// Existence check ahead of a mutation.
async fn ensure_exists(store: &dyn UserStore, name: &str) -> Result<User, ApiError> {
    store
        .find_by_name(name)
        .await
        .map_err(ApiError::store(INTERNAL))?
        .ok_or(ApiError::NotFound)
}

/// POST /create - insert a new user
async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let payload: UserPayload = parse_json(&body)?;

    state
        .store
        .insert(&payload.name)
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation(_) => ApiError::Conflict,
            other => ApiError::store(CREATE_FAILED)(other),
        })?;

    tracing::info!(name = %payload.name, "User created");
    Ok(CREATED)
}

/// GET /user/{name} - look up a user by exact name
async fn get_user(
    State(state): State<Arc<AppState>>,
    UserName(name): UserName,
) -> Result<Json<User>, ApiError> {
    let user = state
        .store
        .find_by_name(&name)
        .await
        .map_err(ApiError::store(INTERNAL))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(user))
}

/// PUT /user/{name} - rename a user
///
/// Rejects the rename when a row already holds the new name, which also
/// covers renaming a user to its current name.
async fn update_user(
    State(state): State<Arc<AppState>>,
    UserName(name): UserName,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let store = state.store.as_ref();
    ensure_exists(store, &name).await?;

    let payload: UserPayload = parse_json(&body)?;

    if store
        .find_by_name(&payload.name)
        .await
        .map_err(ApiError::store(UPDATE_FAILED))?
        .is_some()
    {
        return Err(ApiError::NameTaken);
    }

    let rows = store
        .rename(&name, &payload.name)
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation(_) => ApiError::NameTaken,
            other => ApiError::store(UPDATE_FAILED)(other),
        })?;

    if rows == 0 {
        tracing::warn!(name = %name, new_name = %payload.name, "Rename affected no rows");
    } else {
        tracing::info!(name = %name, new_name = %payload.name, "User renamed");
    }
    Ok(UPDATED)
}

/// DELETE /delete/{name} - remove a user
///
/// The body must be a JSON object or `null`; its content is ignored.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    UserName(name): UserName,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let store = state.store.as_ref();
    ensure_exists(store, &name).await?;

    let _: UserPayload = parse_json(&body)?;

    let rows = store
        .delete(&name)
        .await
        .map_err(ApiError::store(DELETE_FAILED))?;

    if rows == 0 {
        tracing::warn!(name = %name, "Delete affected no rows");
    } else {
        tracing::info!(name = %name, "User deleted");
    }
    Ok(DELETED)
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(create_user))
        .route("/user/{name}", get(get_user).put(update_user))
        .route("/delete/{name}", delete(delete_user))
}
