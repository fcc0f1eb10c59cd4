//! Directory server - wires the store, the service, and the HTTP API.

use crate::application_service::contact_service::ContactService;
use crate::config::DirectoryConfig;
use crate::infrastructure::{SledContactRepository, TimeoutContactRepository};
use crate::port::contact_repository::ContactRepository;
use crate::presentation::http_api::{build_app, AppState};
use anyhow::{Context, Result};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Repository stack used by the running service.
pub type DirectoryRepository = TimeoutContactRepository<SledContactRepository>;

/// Directory server instance.
pub struct DirectoryServer {
    config: DirectoryConfig,
    service: AppState<DirectoryRepository>,
}

impl DirectoryServer {
    /// Create a new DirectoryServer with the given configuration.
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir).context("Failed to create data directory")?;

        let store = SledContactRepository::open(config.store_path())
            .context("Failed to open contact store")?;
        let repository = TimeoutContactRepository::new(store, config.store_timeout());

        Ok(Self {
            config,
            service: Arc::new(ContactService::new(repository)),
        })
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn service(&self) -> AppState<DirectoryRepository> {
        self.service.clone()
    }

    pub fn router(&self) -> Router {
        let static_dir = self.config.resolved_static_dir();
        if let Some(dir) = &static_dir {
            tracing::info!("Serving static files from {:?}", dir);
        }
        build_app(self.service(), static_dir.as_deref())
    }

    /// Run the HTTP server until Ctrl-C.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.http_addr)
            .await
            .context("Failed to bind HTTP listener")?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves, then
    /// flush the store.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().context("Listener has no local address")?;
        tracing::info!("Server running on port {}", addr.port());

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;

        self.service
            .repository()
            .flush()
            .await
            .context("Failed to flush contact store")?;
        tracing::info!("Directory server stopped");

        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
