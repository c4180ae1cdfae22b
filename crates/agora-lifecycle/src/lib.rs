//! # Agora Lifecycle
//!
//! Proposal/ballot lifecycle engine: the ordered validation pipelines and
//! state transitions that decide whether a proposal may be created,
//! whether a ballot may be admitted, how block confirmations accumulate,
//! and how a proposal is sealed into a final tally when an external
//! expiration signal arrives.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure business logic, no I/O
//!   - Admission predicates for the proposal and ballot pipelines
//!   - The `Open → Settled` lifecycle state machine
//!   - Query filter/sort/paging validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - Driving ports: admission, lifecycle and query APIs
//!   - Driven ports: `ProposalStore`, `UserStore`, `TimeSource`
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `ProposalService`, `BallotService`: stateless pipelines over the
//!     injected store gateways
//!
//! - **Events Layer** (`events/`): Wire request/response message types
//!
//! - **Handler Layer** (`handler/`): Request dispatch and error-to-status
//!   conversion
//!
//! - **Adapters Layer** (`adapters/`): Bus adapter, in-memory document
//!   store, time sources
//!
//! ## Invariants
//!
//! - A topic is claimed at most once; settled topics are never reused.
//! - At most one ballot per `(user, topic)` pair, enforced by the
//!   admission pipeline backed by store-level conditional updates.
//! - Once `expired` is set it never clears; confirmations may still
//!   append afterwards as audit data.
//! - Every wire operation answers with a success flag and a status code;
//!   domain rejections are never transport faults.
//!
//! ## Wiring to Runtime
//!
//! ```ignore
//! use agora_lifecycle::{
//!     ClientRequestHandler, InMemoryStore, LifecycleBusAdapter, Metrics,
//!     SystemTimeSource, BallotService, ProposalService,
//! };
//! use shared_bus::InMemoryEventBus;
//! use std::sync::Arc;
//!
//! let bus = Arc::new(InMemoryEventBus::new());
//! let store = Arc::new(InMemoryStore::new(Arc::new(SystemTimeSource)));
//! let proposals = Arc::new(ProposalService::new(store.clone()));
//! let ballots = Arc::new(BallotService::new(store.clone(), store));
//! let handler = Arc::new(ClientRequestHandler::new(
//!     proposals.clone(), ballots.clone(), proposals.clone(), proposals, ballots,
//! ));
//! let adapter = Arc::new(LifecycleBusAdapter::new(bus, handler, Arc::new(Metrics::new())));
//! tokio::spawn(adapter.run());
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod handler;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{FixedTimeSource, InMemoryStore, LifecycleBusAdapter, SystemTimeSource};
pub use domain::{Paging, ProposalFilter, ProposalPhase, SortDirection, SortField, SortSpec};
pub use error::{
    status, BallotAdmissionError, ProposalAdmissionError, QueryError, SettlementError, StoreError,
};
pub use handler::ClientRequestHandler;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{
    BallotAdmission, BallotQueries, LifecycleApi, ProposalAdmission, ProposalQueries,
    ProposalStore, TimeSource, UserStore,
};
pub use service::{BallotService, ProposalService};
