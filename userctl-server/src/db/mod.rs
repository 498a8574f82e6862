//! Database layer - connection pool, schema and user stores
//!
//! Every store operation is a single statement. Handlers compose them into
//! check-then-act sequences without a surrounding transaction, so a
//! concurrent request can slip in between the check and the mutation.

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

pub use memory::MemoryUserStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgUserStore;
pub use schema::ensure_schema;
pub use store::{StoreError, UserStore};
