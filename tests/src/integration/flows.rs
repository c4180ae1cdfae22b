//! # Integration Test Flows
//!
//! Tests that the web-client gateway path, the blockchain-observer path
//! and the lifecycle engine work together correctly via the shared bus.
//!
//! ## Flows Tested
//!
//! 1. **Client → Engine**: validate/cache requests answered with
//!    correlated structured responses
//! 2. **Observer → Engine**: block confirmations and expiration signals
//!    acknowledged and applied to the store
//! 3. **Query facade**: detail, filtered/sorted/paged listing and
//!    per-user ballot retrieval over the bus

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::{json, Value};
    use tokio::time::timeout;
    use uuid::Uuid;

    // Shared infrastructure
    use shared_bus::{EventFilter, EventPublisher, EventTopic, GovernanceEvent, InMemoryEventBus};

    // Lifecycle engine
    use agora_lifecycle::{
        BallotService, ClientRequestHandler, FixedTimeSource, InMemoryStore, LifecycleBusAdapter,
        Metrics, ProposalService,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct EngineFixture {
        bus: Arc<InMemoryEventBus>,
        clock: Arc<FixedTimeSource>,
        responses: shared_bus::Subscription,
    }

    /// Wire a full engine (store, services, handler, adapter) onto a
    /// fresh bus and spawn it.
    async fn start_engine() -> EngineFixture {
        let clock = Arc::new(FixedTimeSource::new(1_000));
        let store = Arc::new(InMemoryStore::new(clock.clone()));
        let proposals = Arc::new(ProposalService::new(store.clone()));
        let ballots = Arc::new(BallotService::new(store.clone(), store));
        let handler = Arc::new(ClientRequestHandler::new(
            proposals.clone(),
            ballots.clone(),
            proposals.clone(),
            proposals,
            ballots,
        ));

        let bus = Arc::new(InMemoryEventBus::new());
        let adapter = Arc::new(LifecycleBusAdapter::new(
            bus.clone(),
            handler,
            Arc::new(Metrics::new()),
        ));

        let responses = bus.subscribe(EventFilter::topics(vec![EventTopic::EngineResponse]));
        tokio::spawn(adapter.run());
        tokio::task::yield_now().await;

        EngineFixture {
            bus,
            clock,
            responses,
        }
    }

    impl EngineFixture {
        /// Publish a client request and await its correlated response body.
        async fn request(&mut self, method: &str, params: Value) -> Value {
            let correlation_id = Uuid::new_v4().to_string();
            self.bus
                .publish(GovernanceEvent::ClientRequest {
                    correlation_id: correlation_id.clone(),
                    method: method.to_string(),
                    params,
                })
                .await;

            loop {
                let event = timeout(Duration::from_secs(1), self.responses.recv())
                    .await
                    .expect("response timeout")
                    .expect("bus closed");

                if let GovernanceEvent::ClientResponse {
                    correlation_id: id,
                    body,
                } = event
                {
                    if id == correlation_id {
                        return body;
                    }
                }
            }
        }

        /// Publish an observer signal and await its correlated ack.
        async fn observer_signal(&mut self, event_for: impl FnOnce(String) -> GovernanceEvent) -> (bool, String) {
            let correlation_id = Uuid::new_v4().to_string();
            self.bus.publish(event_for(correlation_id.clone())).await;

            loop {
                let event = timeout(Duration::from_secs(1), self.responses.recv())
                    .await
                    .expect("ack timeout")
                    .expect("bus closed");

                if let GovernanceEvent::ObserverAck {
                    correlation_id: id,
                    cached,
                    status,
                } = event
                {
                    if id == correlation_id {
                        return (cached, status);
                    }
                }
            }
        }
    }

    // =============================================================================
    // INTEGRATION TESTS: FULL PROPOSAL LIFECYCLE
    // =============================================================================

    /// One proposal from creation through voting to settlement, all over
    /// the bus.
    #[tokio::test]
    async fn test_full_proposal_lifecycle() {
        let mut engine = start_engine().await;

        // Validate then create T1
        let body = engine
            .request("validate_proposal", json!({ "topic": "T1" }))
            .await;
        assert_eq!(body["validation"], true);

        let body = engine
            .request(
                "cache_proposal",
                json!({ "topic": "T1", "duration": 60, "options": ["A", "B"] }),
            )
            .await;
        assert_eq!(body["cached"], true);

        // Fresh proposal: open, zero result
        let body = engine.request("get_proposal", json!({ "topic": "T1" })).await;
        assert_eq!(body["queried"], true);
        assert_eq!(body["proposal"]["expired"], false);
        assert_eq!(body["proposal"]["result"]["count"], 0);
        assert_eq!(body["proposal"]["createdAt"], 1_000);
        assert_eq!(body["proposal"]["expiredAt"], 1_000 + 3_600);

        // First ballot admitted and cached
        let body = engine
            .request(
                "validate_ballot",
                json!({ "userHash": "U1", "topic": "T1", "option": "A" }),
            )
            .await;
        assert_eq!(body["validation"], true);

        let body = engine
            .request(
                "cache_ballot",
                json!({ "userHash": "U1", "voteHash": "0xfeed", "topic": "T1" }),
            )
            .await;
        assert_eq!(body["cached"], true);

        // Retry is a duplicate
        let body = engine
            .request(
                "validate_ballot",
                json!({ "userHash": "U1", "topic": "T1", "option": "A" }),
            )
            .await;
        assert_eq!(body["validation"], false);
        assert_eq!(body["status"], "DUPLICATE_VOTE_SUBMISSION");

        // A confirmation arrives from the chain
        let (cached, status) = engine
            .observer_signal(|correlation_id| GovernanceEvent::BlockCreated {
                correlation_id,
                topic: "T1".to_string(),
                height: 42,
                length: 43,
            })
            .await;
        assert!(cached);
        assert_eq!(status, "OK");

        // The expiration signal settles the proposal
        engine.clock.set(4_600);
        let mut options = std::collections::BTreeMap::new();
        options.insert("A".to_string(), 1);
        options.insert("B".to_string(), 0);
        let (cached, status) = engine
            .observer_signal(|correlation_id| GovernanceEvent::PendingExpired {
                correlation_id,
                topic: "T1".to_string(),
                count: 1,
                options,
            })
            .await;
        assert!(cached);
        assert_eq!(status, "OK");

        // Settled view: expired, tally frozen, confirmation visible
        let body = engine.request("get_proposal", json!({ "topic": "T1" })).await;
        assert_eq!(body["proposal"]["expired"], true);
        assert_eq!(body["proposal"]["settledAt"], 4_600);
        assert_eq!(body["proposal"]["result"]["count"], 1);
        assert_eq!(body["proposal"]["result"]["options"]["A"], 1);
        assert_eq!(body["proposal"]["result"]["options"]["B"], 0);
        assert_eq!(body["proposal"]["blockConfirmations"][0]["height"], 42);

        // The topic is burnt: revalidation reports expiry
        let body = engine
            .request("validate_proposal", json!({ "topic": "T1" }))
            .await;
        assert_eq!(body["validation"], false);
        assert_eq!(body["status"], "PROPOSAL_EXPIRED");

        // Ballots against the settled proposal report expiry too
        let body = engine
            .request(
                "validate_ballot",
                json!({ "userHash": "U2", "topic": "T1", "option": "B" }),
            )
            .await;
        assert_eq!(body["status"], "PROPOSAL_EXPIRED");
    }

    /// Confirmations arriving after settlement still append (audit data).
    #[tokio::test]
    async fn test_late_confirmation_after_settlement() {
        let mut engine = start_engine().await;
        engine
            .request(
                "cache_proposal",
                json!({ "topic": "T1", "duration": 5, "options": ["A"] }),
            )
            .await;

        let (cached, _) = engine
            .observer_signal(|correlation_id| GovernanceEvent::PendingExpired {
                correlation_id,
                topic: "T1".to_string(),
                count: 0,
                options: Default::default(),
            })
            .await;
        assert!(cached);

        let (cached, status) = engine
            .observer_signal(|correlation_id| GovernanceEvent::BlockCreated {
                correlation_id,
                topic: "T1".to_string(),
                height: 99,
                length: 100,
            })
            .await;
        assert!(cached);
        assert_eq!(status, "OK");

        let body = engine.request("get_proposal", json!({ "topic": "T1" })).await;
        assert_eq!(body["proposal"]["expired"], true);
        assert_eq!(body["proposal"]["blockConfirmations"][0]["height"], 99);
    }

    // =============================================================================
    // INTEGRATION TESTS: QUERY FACADE
    // =============================================================================

    /// Paging over a seeded listing behaves per the facade contract.
    #[tokio::test]
    async fn test_listing_pagination_round_trip() {
        let mut engine = start_engine().await;

        for (i, topic) in ["T1", "T2", "T3", "T4", "T5"].iter().enumerate() {
            engine.clock.set(1_000 + i as u64);
            engine
                .request(
                    "cache_proposal",
                    json!({ "topic": topic, "duration": 10, "options": ["A"] }),
                )
                .await;
        }

        // skip=0, limit=N returns min(N, total) in requested order
        let body = engine
            .request(
                "list_proposals",
                json!({
                    "sort": { "sortBy": "createdAt", "order": "desc" },
                    "paging": { "skip": 0, "limit": 3 },
                }),
            )
            .await;
        assert_eq!(body["queried"], true);
        let list = body["proposalList"].as_array().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0]["topic"], "T5");
        assert_eq!(list[2]["topic"], "T3");

        // limit beyond the total returns everything
        let body = engine
            .request(
                "list_proposals",
                json!({ "paging": { "skip": 0, "limit": 50 } }),
            )
            .await;
        assert_eq!(body["proposalList"].as_array().unwrap().len(), 5);

        // skip == total pages out of bounds
        let body = engine
            .request(
                "list_proposals",
                json!({ "paging": { "skip": 5, "limit": 3 } }),
            )
            .await;
        assert_eq!(body["queried"], false);
        assert_eq!(body["status"], "PAGING_OUT_OF_BOUNDS");

        // Boundary parameter rejections
        let body = engine
            .request(
                "list_proposals",
                json!({ "paging": { "skip": 0, "limit": 0 } }),
            )
            .await;
        assert_eq!(body["status"], "LIMIT_ZERO_PARAM");

        let body = engine
            .request(
                "list_proposals",
                json!({ "paging": { "skip": -2, "limit": 3 } }),
            )
            .await;
        assert_eq!(body["status"], "SKIP_ZERO_PARAM");
    }

    /// The expired filter is tri-state over the wire.
    #[tokio::test]
    async fn test_listing_expired_filter() {
        let mut engine = start_engine().await;

        for topic in ["T1", "T2", "T3"] {
            engine
                .request(
                    "cache_proposal",
                    json!({ "topic": topic, "duration": 10, "options": ["A"] }),
                )
                .await;
        }
        engine
            .observer_signal(|correlation_id| GovernanceEvent::PendingExpired {
                correlation_id,
                topic: "T2".to_string(),
                count: 0,
                options: Default::default(),
            })
            .await;

        let body = engine
            .request(
                "list_proposals",
                json!({
                    "filter": { "expired": true },
                    "paging": { "skip": 0, "limit": 10 },
                }),
            )
            .await;
        let list = body["proposalList"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["topic"], "T2");

        let body = engine
            .request(
                "list_proposals",
                json!({
                    "filter": { "expired": false },
                    "paging": { "skip": 0, "limit": 10 },
                }),
            )
            .await;
        assert_eq!(body["proposalList"].as_array().unwrap().len(), 2);
    }

    /// User-ballot retrieval distinguishes absent users from empty logs.
    #[tokio::test]
    async fn test_user_ballots_over_the_bus() {
        let mut engine = start_engine().await;
        engine
            .request(
                "cache_proposal",
                json!({ "topic": "T1", "duration": 10, "options": ["A"] }),
            )
            .await;

        // Unknown user
        let body = engine
            .request("get_user_ballots", json!({ "userHash": "U1" }))
            .await;
        assert_eq!(body["queried"], false);
        assert_eq!(body["status"], "USER_NOT_FOUND");

        // Validation creates the user; zero ballots is a success
        engine
            .request(
                "validate_ballot",
                json!({ "userHash": "U1", "topic": "T1", "option": "A" }),
            )
            .await;
        let body = engine
            .request("get_user_ballots", json!({ "userHash": "U1" }))
            .await;
        assert_eq!(body["queried"], true);
        assert_eq!(body["ballots"].as_array().unwrap().len(), 0);

        // One cached ballot shows up with its vote hash
        engine.clock.set(2_000);
        engine
            .request(
                "cache_ballot",
                json!({ "userHash": "U1", "voteHash": "0xfeed", "topic": "T1" }),
            )
            .await;
        let body = engine
            .request("get_user_ballots", json!({ "userHash": "U1" }))
            .await;
        let ballots = body["ballots"].as_array().unwrap();
        assert_eq!(ballots.len(), 1);
        assert_eq!(ballots[0]["voteHash"], "0xfeed");
        assert_eq!(ballots[0]["topic"], "T1");
        assert_eq!(ballots[0]["submittedAt"], 2_000);
    }

    // =============================================================================
    // INTEGRATION TESTS: PROTOCOL ROBUSTNESS
    // =============================================================================

    /// Every well-formed request gets exactly one correlated response,
    /// even for unknown methods or broken parameters.
    #[tokio::test]
    async fn test_malformed_traffic_still_answered() {
        let mut engine = start_engine().await;

        let body = engine.request("not_a_method", json!({})).await;
        assert_eq!(body["status"], "UNKNOWN_ERROR");

        let body = engine
            .request("validate_ballot", json!({ "userHash": 7 }))
            .await;
        assert_eq!(body["validation"], false);
        assert_eq!(body["status"], "UNKNOWN_ERROR");

        // The engine keeps serving afterwards
        let body = engine
            .request("validate_proposal", json!({ "topic": "T1" }))
            .await;
        assert_eq!(body["validation"], true);
    }

    /// Concurrent requests from independent users are all answered.
    #[tokio::test]
    async fn test_interleaved_users_and_topics() {
        let mut engine = start_engine().await;

        for topic in ["T1", "T2"] {
            engine
                .request(
                    "cache_proposal",
                    json!({ "topic": topic, "duration": 10, "options": ["A", "B"] }),
                )
                .await;
        }

        for (user, topic, option) in [("U1", "T1", "A"), ("U2", "T1", "B"), ("U1", "T2", "B")] {
            let body = engine
                .request(
                    "validate_ballot",
                    json!({ "userHash": user, "topic": topic, "option": option }),
                )
                .await;
            assert_eq!(body["validation"], true, "{user}/{topic} should be admitted");

            let body = engine
                .request(
                    "cache_ballot",
                    json!({
                        "userHash": user,
                        "voteHash": format!("0x{user}{topic}"),
                        "topic": topic,
                    }),
                )
                .await;
            assert_eq!(body["cached"], true);
        }

        let body = engine
            .request("get_user_ballots", json!({ "userHash": "U1" }))
            .await;
        assert_eq!(body["ballots"].as_array().unwrap().len(), 2);
    }
}
