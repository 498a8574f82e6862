//! Health check endpoint
//!
//! Reports whether the user store answers a round-trip. A store that does
//! not answer turns the response into a 503 so load balancers stop routing
//! to this instance.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (status, store) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(err) => {
            tracing::warn!(error = %err, "Health check: store unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };

    let body = HealthResponse {
        status: if status.is_success() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store,
    };
    (status, Json(body))
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryUserStore, StoreError, UserStore};
    use crate::models::User;
    use async_trait::async_trait;

    /// Store whose backend is gone.
    struct ClosedStore;

    #[async_trait]
    impl UserStore for ClosedStore {
        async fn insert(&self, _name: &str) -> Result<(), StoreError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn find_by_name(&self, _name: &str) -> Result<Option<User>, StoreError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn rename(&self, _old: &str, _new: &str) -> Result<u64, StoreError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn delete(&self, _name: &str) -> Result<u64, StoreError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(sqlx::Error::PoolClosed.into())
        }
    }

    fn state(store: Arc<dyn UserStore>) -> State<Arc<AppState>> {
        State(Arc::new(AppState { store }))
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, Json(body)) = health(state(Arc::new(MemoryUserStore::new()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.store, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn unreachable_store_is_503() {
        let (status, Json(body)) = health(state(Arc::new(ClosedStore))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.store, "unreachable");
    }
}
