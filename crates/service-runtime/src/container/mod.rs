//! # Service Container
//!
//! Builds the engine's object graph once at startup: event bus, store,
//! services, request handler and bus adapter. Everything is stateless
//! after construction apart from the store itself; request handlers
//! share immutable handles.

pub mod config;

pub use config::{ConfigError, ServiceConfig};

use std::sync::Arc;

use agora_lifecycle::{
    BallotService, ClientRequestHandler, InMemoryStore, LifecycleBusAdapter, Metrics,
    ProposalService, SystemTimeSource,
};
use shared_bus::InMemoryEventBus;

/// Container holding the wired subsystems.
pub struct ServiceContainer {
    /// Runtime configuration.
    pub config: ServiceConfig,
    /// The shared event bus.
    pub bus: Arc<InMemoryEventBus>,
    /// The entity store.
    pub store: Arc<InMemoryStore>,
    /// Engine metrics.
    pub metrics: Arc<Metrics>,
    /// The engine's bus adapter, ready to spawn.
    pub adapter: Arc<LifecycleBusAdapter>,
}

impl ServiceContainer {
    /// Wire all subsystems from configuration.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
        let store = Arc::new(InMemoryStore::new(Arc::new(SystemTimeSource)));

        let proposals = Arc::new(ProposalService::new(store.clone()));
        let ballots = Arc::new(BallotService::new(store.clone(), store.clone()));

        let handler = Arc::new(ClientRequestHandler::new(
            proposals.clone(),
            ballots.clone(),
            proposals.clone(),
            proposals,
            ballots,
        ));

        let metrics = Arc::new(Metrics::new());
        let adapter = Arc::new(LifecycleBusAdapter::new(
            bus.clone(),
            handler,
            metrics.clone(),
        ));

        Self {
            config,
            bus,
            store,
            metrics,
            adapter,
        }
    }
}
