//! # Agora Service Runtime
//!
//! The main entry point for the governance cache service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging from configuration
//! 2. Load configuration from environment
//! 3. Wire the container (bus, store, services, handler, adapter)
//! 4. Spawn the lifecycle bus adapter
//! 5. Run until ctrl-c, then shut down gracefully

pub mod container;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::container::{ServiceConfig, ServiceContainer};

/// The runtime orchestrating the lifecycle engine.
pub struct ServiceRuntime {
    /// Wired subsystem container.
    container: ServiceContainer,
    /// Shutdown signal sender.
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl ServiceRuntime {
    /// Create a new runtime with configuration.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        info!("Creating {} service runtime", config.service_name);

        let container = ServiceContainer::new(config);
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

        Self {
            container,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Start the runtime: spawn the engine's bus adapter.
    pub fn start(&self) {
        info!("===========================================");
        info!("  Welcome! Starting {}", self.container.config.service_name);
        info!("===========================================");

        let adapter = self.container.adapter.clone();
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = adapter.run() => {}
                _ = shutdown.changed() => {
                    info!("[lifecycle-engine] Shutdown signal received");
                }
            }
        });

        info!(
            bus_capacity = self.container.bus.capacity(),
            "Lifecycle engine running"
        );
    }

    /// Shutdown the service gracefully.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        // Give the adapter time to finish in-flight requests
        tokio::time::sleep(Duration::from_millis(200)).await;

        let snapshot = self.container.metrics.snapshot();
        info!(
            requests_handled = snapshot.requests_handled,
            requests_rejected = snapshot.requests_rejected,
            settlements_applied = snapshot.settlements_applied,
            "Shutdown complete"
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; the log filter comes from it
    let config = ServiceConfig::from_env().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create and start the runtime
    let runtime = ServiceRuntime::new(config);
    runtime.start();

    // Keep the service running
    info!("Service is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    // Graceful shutdown
    runtime.shutdown().await;

    Ok(())
}
