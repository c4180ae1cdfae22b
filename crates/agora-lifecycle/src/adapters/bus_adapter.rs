//! Event Bus Adapter for the lifecycle engine.
//!
//! Subscribes to web-client requests and blockchain-observer signals on
//! the shared bus, routes them through the request handler and publishes
//! the correlated responses. One logical request is handled per inbound
//! event; ordering across events comes from the store, not from here.

use std::sync::Arc;

use futures::StreamExt;
use shared_bus::{EventFilter, EventPublisher, EventTopic, GovernanceEvent, InMemoryEventBus};
use tracing::{debug, info, warn};

use crate::error::status;
use crate::handler::ClientRequestHandler;
use crate::metrics::MetricsRecorder;

/// Bus adapter for the lifecycle engine.
///
/// Handles:
/// 1. `ClientRequest` events from the web-client gateway
/// 2. `BlockCreated`/`PendingExpired` events from the chain observer
pub struct LifecycleBusAdapter {
    /// Reference to the event bus.
    bus: Arc<InMemoryEventBus>,
    /// The request dispatcher.
    handler: Arc<ClientRequestHandler>,
    /// Metrics sink.
    metrics: Arc<dyn MetricsRecorder>,
}

impl LifecycleBusAdapter {
    /// Create a new bus adapter.
    pub fn new(
        bus: Arc<InMemoryEventBus>,
        handler: Arc<ClientRequestHandler>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        Self {
            bus,
            handler,
            metrics,
        }
    }

    /// Start listening for events.
    ///
    /// This should be spawned as a background task.
    pub async fn run(self: Arc<Self>) {
        info!("[LifecycleBusAdapter] Started listening for events");

        let filter = EventFilter::topics(vec![EventTopic::WebClient, EventTopic::BlockObserver]);
        let mut stream = self.bus.event_stream(filter);

        loop {
            match stream.next().await {
                Some(event) => self.handle_event(event).await,
                None => {
                    warn!("[LifecycleBusAdapter] Event stream ended, shutting down");
                    break;
                }
            }
        }
    }

    /// Handle one inbound governance event.
    async fn handle_event(&self, event: GovernanceEvent) {
        match event {
            GovernanceEvent::ClientRequest {
                correlation_id,
                method,
                params,
            } => {
                debug!(
                    correlation_id = %correlation_id,
                    method = %method,
                    "Handling client request"
                );

                let body = self.handler.dispatch(&method, params).await;
                let ok = body.get("status").and_then(|s| s.as_str()) == Some(status::OK);
                self.metrics.record_request(ok);

                self.bus
                    .publish(GovernanceEvent::ClientResponse {
                        correlation_id,
                        body,
                    })
                    .await;
            }

            GovernanceEvent::BlockCreated {
                correlation_id,
                topic,
                height,
                length,
            } => {
                debug!(
                    correlation_id = %correlation_id,
                    topic = %topic,
                    height = height,
                    "Handling block-created signal"
                );

                let response = self.handler.handle_block_created(&topic, height, length).await;
                if response.cached {
                    self.metrics.record_confirmation();
                }

                self.bus
                    .publish(GovernanceEvent::ObserverAck {
                        correlation_id,
                        cached: response.cached,
                        status: response.status,
                    })
                    .await;
            }

            GovernanceEvent::PendingExpired {
                correlation_id,
                topic,
                count,
                options,
            } => {
                debug!(
                    correlation_id = %correlation_id,
                    topic = %topic,
                    count = count,
                    "Handling pending-expired signal"
                );

                let response = self.handler.handle_pending_expired(&topic, count, options).await;
                if response.cached {
                    self.metrics.record_settlement();
                }

                self.bus
                    .publish(GovernanceEvent::ObserverAck {
                        correlation_id,
                        cached: response.cached,
                        status: response.status,
                    })
                    .await;
            }

            // Responses are outbound only; the subscription filter
            // already excludes them.
            GovernanceEvent::ClientResponse { .. } | GovernanceEvent::ObserverAck { .. } => {}
        }
    }
}
