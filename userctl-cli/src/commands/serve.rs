//! HTTP server command
//!
//! Owns the storage lifecycle: the pool is opened once here, injected into
//! the router and closed after the server has drained.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use userctl_server::db::{create_pool_with_options, ensure_schema, pool::DEFAULT_MAX_CONNECTIONS};
use userctl_server::{run_server, MemoryUserStore, PgUserStore, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "USERCTL_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Full database URL (takes precedence over the --db-* parameters)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Maximum connections in the database pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Serve from an in-memory store instead of Postgres (database flags are ignored)
    #[arg(long)]
    pub in_memory: bool,
}

/// Individual connection parameters used when no URL is given
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Database host
    #[arg(long = "db-host", default_value = "postgres")]
    pub host: String,

    /// Database port
    #[arg(long = "db-port", default_value_t = 5432)]
    pub port: u16,

    /// Database user
    #[arg(long = "db-user", default_value = "username")]
    pub user: String,

    /// Database password
    #[arg(long = "db-password", default_value = "password")]
    pub password: String,

    /// Database name
    #[arg(long = "db-name", default_value = "database")]
    pub dbname: String,
}

impl ConnectionArgs {
    /// Build a postgres:// URL with TLS disabled.
    pub fn to_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode=disable",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            urlencoding::encode(&self.dbname),
        )
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
    };

    if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        return run_server(Arc::new(MemoryUserStore::new()), config)
            .await
            .context("Server error");
    }

    let database_url = args
        .database_url
        .unwrap_or_else(|| args.connection.to_url());

    tracing::info!(max_connections = args.max_connections, "Connecting to database");
    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    ensure_schema(&pool)
        .await
        .context("Failed to create schema")?;

    tracing::info!("Starting userctl server on {}", args.bind);
    let result = run_server(Arc::new(PgUserStore::new(pool.clone())), config).await;

    pool.close().await;
    tracing::info!("Database pool closed");

    result.context("Server error")
}
