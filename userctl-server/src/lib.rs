//! userctl-server: HTTP CRUD service over user records
//!
//! Maps a handful of HTTP routes onto SQL statements against the
//! `namestable` table. Storage sits behind the [`db::UserStore`] trait so
//! the router can run against Postgres or the in-memory store.

pub mod db;
pub mod http;
pub mod models;

pub use db::{MemoryUserStore, PgUserStore, StoreError, UserStore};
pub use http::{build_router, run_server, ServerConfig};
pub use models::User;
