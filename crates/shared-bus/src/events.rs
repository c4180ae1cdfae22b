//! # Governance Events
//!
//! Defines all event types that flow through the shared bus.
//!
//! Two producers feed the bus: the web-client gateway (request events
//! carrying a method name and JSON parameters) and the blockchain
//! observer (block-created and pending-expired signals). The lifecycle
//! engine consumes both and answers with response events correlated by id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GovernanceEvent {
    // =========================================================================
    // WEB CLIENT GATEWAY
    // =========================================================================
    /// Request from a web client to the lifecycle engine.
    /// The engine responds with a matching `ClientResponse`.
    ClientRequest {
        /// Unique correlation ID to match request/response.
        correlation_id: String,
        /// Request method name (e.g., "validate_ballot").
        method: String,
        /// Request parameters as JSON.
        params: serde_json::Value,
    },

    /// Response from the lifecycle engine to a web client request.
    ///
    /// The body always carries a success flag and a status code string;
    /// domain rejections are responses, never bus-level failures.
    ClientResponse {
        /// Correlation ID matching the original request.
        correlation_id: String,
        /// Full response message as JSON.
        body: serde_json::Value,
    },

    // =========================================================================
    // BLOCKCHAIN OBSERVER
    // =========================================================================
    /// A block associated with a proposal topic was created on chain.
    BlockCreated {
        /// Unique correlation ID to match the acknowledgement.
        correlation_id: String,
        /// Topic of the proposal the block belongs to.
        topic: String,
        /// Block height.
        height: u64,
        /// Chain length at observation time.
        length: u64,
    },

    /// A proposal's voting window expired; the observer reports the tally.
    PendingExpired {
        /// Unique correlation ID to match the acknowledgement.
        correlation_id: String,
        /// Topic of the expired proposal.
        topic: String,
        /// Total votes counted by the reporter.
        count: u64,
        /// Votes per option counted by the reporter.
        options: BTreeMap<String, u64>,
    },

    /// Acknowledgement for an observer signal.
    ObserverAck {
        /// Correlation ID matching the observer event.
        correlation_id: String,
        /// Whether the signal was applied to the store.
        cached: bool,
        /// Machine-readable status code.
        status: String,
    },
}

impl GovernanceEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ClientRequest { .. } => EventTopic::WebClient,
            Self::BlockCreated { .. } | Self::PendingExpired { .. } => EventTopic::BlockObserver,
            Self::ClientResponse { .. } | Self::ObserverAck { .. } => EventTopic::EngineResponse,
        }
    }

    /// Get the correlation id carried by this event.
    #[must_use]
    pub fn correlation_id(&self) -> &str {
        match self {
            Self::ClientRequest { correlation_id, .. }
            | Self::ClientResponse { correlation_id, .. }
            | Self::BlockCreated { correlation_id, .. }
            | Self::PendingExpired { correlation_id, .. }
            | Self::ObserverAck { correlation_id, .. } => correlation_id,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Requests from the web-client gateway.
    WebClient,
    /// Signals from the blockchain observer.
    BlockObserver,
    /// Responses and acknowledgements from the lifecycle engine.
    EngineResponse,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &GovernanceEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
