use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use calculator::infra::storage::{self, SeaOrmHistoryRepository, migrations};
use calculator::sea_orm::DatabaseConnection;
use calculator::{Service, router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::http;

/// Delay between schema attempts while the database is unreachable.
const MIGRATION_RETRY_INTERVAL: Duration = Duration::from_secs(15);

pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Calculator Server starting");

    let cancel = CancellationToken::new();
    spawn_signal_waiter(cancel.clone());

    // The pool is lazy: a database that is down at startup does not keep the
    // server from accepting requests.
    let db = storage::connect(&config.database).await?;
    if config.database.run_migrations && !migrate(&db).await {
        tokio::spawn(retry_migrations(db.clone(), cancel.clone()));
    }

    let repo = Arc::new(SeaOrmHistoryRepository::new(db));
    let service = Arc::new(Service::new(repo, config.calculator.clone()));
    let app = http::apply_middleware_stack(router(service), &config.server);

    let listener = TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully");
        })
        .await
        .context("HTTP server failed")?;

    tracing::info!("Calculator Server stopped");
    Ok(())
}

async fn migrate(db: &DatabaseConnection) -> bool {
    match migrations::run(db).await {
        Ok(()) => {
            tracing::info!("Database schema is up to date");
            true
        }
        Err(e) => {
            tracing::warn!(
                error = %format!("{e:#}"),
                retry_in = ?MIGRATION_RETRY_INTERVAL,
                "Database migrations failed; history is unavailable until they succeed"
            );
            false
        }
    }
}

/// Keeps retrying migrations until they succeed or shutdown begins.
async fn retry_migrations(db: DatabaseConnection, cancel: CancellationToken) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => return,
            () = tokio::time::sleep(MIGRATION_RETRY_INTERVAL) => {}
        }
        if migrate(&db).await {
            return;
        }
    }
}

fn spawn_signal_waiter(cancel: CancellationToken) {
    tokio::spawn(async move {
        match wait_for_shutdown().await {
            Ok(()) => tracing::info!("shutdown signal received"),
            Err(e) => tracing::warn!(error = %e, "signal handler failed; cancelling"),
        }
        cancel.cancel();
    });
}

#[cfg(unix)]
async fn wait_for_shutdown() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
