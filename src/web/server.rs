//! Web server for files-manager.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use crate::auth::{SessionManager, TokenStore};
use crate::config::Config;
use crate::file::BlobStorage;
use crate::{Database, FilesError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Interval between expired-token sweeps.
    cleanup_interval: Duration,
}

impl WebServer {
    /// Create a new web server from the configuration and an open database.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| FilesError::Config(format!("invalid server address: {e}")))?;

        let sessions = SessionManager::new(
            Arc::new(TokenStore::new()),
            Duration::from_secs(config.session.token_ttl_secs),
        );
        tracing::info!(ttl_secs = sessions.ttl().as_secs(), "Session tokens configured");
        let storage = BlobStorage::new(&config.files.storage_path);
        tracing::info!("File storage at: {}", config.files.storage_path);

        let app_state = AppState::new(Arc::new(db), storage, sessions)
            .with_max_upload_size(config.max_upload_size_bytes());

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cleanup_interval: Duration::from_secs(config.session.cleanup_interval_secs),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shared application state.
    pub fn state(&self) -> &Arc<AppState> {
        &self.app_state
    }

    /// One cleanup pass over the session store. Returns the number purged.
    async fn sweep_expired_tokens(sessions: &SessionManager) -> usize {
        let store = sessions.store();
        if store.is_empty().await {
            tracing::debug!("No session tokens to clean up");
            return 0;
        }

        let count = store.purge_expired().await;
        if count > 0 {
            let remaining = store.len().await;
            tracing::info!(
                deleted_count = count,
                remaining = remaining,
                "Cleaned up expired session tokens"
            );
        } else {
            tracing::debug!("No expired session tokens to clean up");
        }
        count
    }

    /// Start the token cleanup background task.
    ///
    /// Expired session tokens are already invisible to lookups; this task
    /// only reclaims their memory.
    fn start_token_cleanup_task(sessions: SessionManager, every: Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;
                Self::sweep_expired_tokens(&sessions).await;
            }
        });
    }

    fn build_router(&self) -> Router {
        create_router(self.app_state.clone()).merge(create_health_router())
    }

    async fn bind(self) -> Result<(TcpListener, Router)> {
        let router = self.build_router();
        let listener = TcpListener::bind(self.addr).await?;

        Self::start_token_cleanup_task(self.app_state.sessions.clone(), self.cleanup_interval);
        tracing::info!(
            interval_secs = self.cleanup_interval.as_secs(),
            "Token cleanup task started"
        );

        Ok((listener, router))
    }

    /// Run the web server.
    pub async fn run(self) -> Result<()> {
        let (listener, router) = self.bind().await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let (listener, router) = self.bind().await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
