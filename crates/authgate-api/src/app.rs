//! Application builder: wires the user directory, session store and router
//! into a running server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use authgate_auth::{AccountService, SessionManager, SessionStore, SessionSweeper};
use authgate_core::config::AppConfig;
use authgate_core::error::{AppError, ErrorKind};
use authgate_core::traits::{Clock, SystemClock};
use authgate_database::{UserDirectory, UserDirectoryManager};

use crate::router::build_router;
use crate::state::AppState;

/// Build handler state around an existing directory and clock.
///
/// The session store is created here and owned by the returned state; every
/// call yields an independent store.
pub fn build_state(
    config: Arc<AppConfig>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
) -> AppState {
    let store = Arc::new(SessionStore::from_config(&config.session, clock));
    let accounts = AccountService::new(directory);
    let session_manager = Arc::new(SessionManager::new(store, accounts));
    AppState::new(config, session_manager)
}

/// Runs the AuthGate server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AuthGate v{}", env!("CARGO_PKG_VERSION"));
    let config = Arc::new(config);

    // ── Step 1: User directory ───────────────────────────────────
    tracing::info!(
        "Initializing user directory (provider: {})...",
        config.database.provider
    );
    let directory: Arc<dyn UserDirectory> =
        Arc::new(UserDirectoryManager::new(&config.database).await?);

    // ── Step 2: Session store + login flows ──────────────────────
    let state = build_state(Arc::clone(&config), directory, Arc::new(SystemClock));
    tracing::info!(
        ttl_seconds = state.session_manager.store().ttl().num_seconds(),
        cookie = %config.session.cookie_name,
        "Session store initialized"
    );

    // ── Step 3: Seed users ───────────────────────────────────────
    if !config.database.seed_users.is_empty() {
        tracing::warn!(
            count = config.database.seed_users.len(),
            "Seeding users from configuration; remove database.seed_users outside local development"
        );
        let created = state
            .session_manager
            .accounts()
            .seed(&config.database.seed_users)
            .await?;
        tracing::info!(created = created, "Seed users applied");
    }

    // ── Step 4: Shutdown channel & sweeper ───────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = match SessionSweeper::from_config(
        Arc::clone(state.session_manager.store()),
        &config.session,
    ) {
        Some(sweeper) => Some(sweeper.spawn(shutdown_rx.clone())),
        None => {
            tracing::info!("Session sweeper disabled, expiry is lazy only");
            None
        }
    };

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app = build_router(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}: {e}"), e)
        })?;

    tracing::info!("AuthGate server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 7: Wait for background tasks ────────────────────────
    if let Some(handle) = sweeper_handle {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Session sweeper did not stop within {}s", grace.as_secs());
        }
    }

    tracing::info!("AuthGate server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
