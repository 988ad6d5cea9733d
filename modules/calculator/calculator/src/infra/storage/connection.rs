use std::time::Duration;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::DatabaseConfig;

/// Keeps the single in-memory SQLite connection from being recycled, which
/// would silently drop the database.
const IN_MEMORY_CONN_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Builds the connection pool for the history store.
///
/// The pool is lazy: no connection is attempted here, so the server comes up
/// even while the database is unreachable and each query reports its own
/// failure once `acquire_timeout` expires.
///
/// # Errors
/// Returns an error if the connection options are invalid, for example an
/// engine whose driver is not compiled in.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(config.url());
    opts.acquire_timeout(config.acquire_timeout)
        .connect_timeout(config.acquire_timeout)
        .connect_lazy(true)
        .sqlx_logging(false);

    if config.is_in_memory() {
        // Every pooled connection would otherwise open its own empty database
        opts.max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_CONN_LIFETIME)
            .max_lifetime(IN_MEMORY_CONN_LIFETIME);
    } else {
        opts.max_connections(config.max_connections);
    }

    let db = Database::connect(opts)
        .await
        .with_context(|| format!("failed to configure database {}", config.redacted_url()))?;

    tracing::info!(
        url = %config.redacted_url(),
        max_connections = config.max_connections,
        acquire_timeout = ?config.acquire_timeout,
        "History store configured"
    );
    Ok(db)
}
