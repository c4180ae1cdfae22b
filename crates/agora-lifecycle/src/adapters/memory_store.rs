//! In-memory document store for the proposals and users collections.
//!
//! Backs single-node operation and the test suites. Each trait method
//! takes the collection lock for the whole call, which gives the
//! conditional writes (`append_confirmation`, `settle_proposal`,
//! `append_ballot`) the same atomic match-and-update semantics a
//! production document store provides per document.
//!
//! Timestamps (`created_at`, `settled_at`, `submitted_at`) are stamped
//! here from the injected time source; callers never supply them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{Ballot, Proposal, Tally, User};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::lifecycle::{apply_confirmation, apply_settlement};
use crate::domain::{Paging, ProposalFilter, SortSpec};
use crate::error::StoreError;
use crate::ports::outbound::{ProposalStore, TimeSource, UserStore};

/// In-memory store holding both collections.
pub struct InMemoryStore {
    proposals: RwLock<HashMap<String, Proposal>>,
    users: RwLock<HashMap<String, User>>,
    clock: Arc<dyn TimeSource>,
}

impl InMemoryStore {
    /// Create an empty store stamping timestamps from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            proposals: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of stored proposals (test/diagnostic helper).
    pub async fn proposal_count(&self) -> usize {
        self.proposals.read().await.len()
    }

    /// Number of stored users (test/diagnostic helper).
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl ProposalStore for InMemoryStore {
    async fn find_proposal(&self, topic: &str) -> Result<Option<Proposal>, StoreError> {
        Ok(self.proposals.read().await.get(topic).cloned())
    }

    async fn create_proposal(
        &self,
        topic: &str,
        duration: u64,
        options: Vec<String>,
    ) -> Result<Proposal, StoreError> {
        let mut proposals = self.proposals.write().await;
        if proposals.contains_key(topic) {
            return Err(StoreError::DuplicateTopic(topic.to_string()));
        }

        let proposal = Proposal::new(topic.to_string(), duration, options, self.clock.now());
        proposals.insert(topic.to_string(), proposal.clone());

        debug!(topic = %topic, "Proposal document inserted");
        Ok(proposal)
    }

    async fn append_confirmation(
        &self,
        topic: &str,
        height: u64,
        length: u64,
    ) -> Result<Option<Proposal>, StoreError> {
        let mut proposals = self.proposals.write().await;
        let Some(proposal) = proposals.get_mut(topic) else {
            return Ok(None);
        };

        apply_confirmation(proposal, height, length);
        Ok(Some(proposal.clone()))
    }

    async fn settle_proposal(
        &self,
        topic: &str,
        tally: Tally,
    ) -> Result<Option<Proposal>, StoreError> {
        let mut proposals = self.proposals.write().await;
        let Some(proposal) = proposals.get_mut(topic) else {
            return Ok(None);
        };

        apply_settlement(proposal, tally, self.clock.now());
        Ok(Some(proposal.clone()))
    }

    async fn list_proposals(
        &self,
        filter: ProposalFilter,
        sort: Option<SortSpec>,
        paging: Paging,
    ) -> Result<Vec<Proposal>, StoreError> {
        let proposals = self.proposals.read().await;

        let mut matching: Vec<Proposal> = proposals
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        match sort {
            Some(spec) => matching.sort_by(|a, b| spec.compare(a, b)),
            // Stable default ordering; the map itself is unordered.
            None => matching.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.topic.cmp(&b.topic))
            }),
        }

        let skip = usize::try_from(paging.skip.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(paging.limit.max(0)).unwrap_or(usize::MAX);

        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    async fn count_proposals(&self, filter: ProposalFilter) -> Result<u64, StoreError> {
        let proposals = self.proposals.read().await;
        Ok(proposals.values().filter(|p| filter.matches(p)).count() as u64)
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_user(&self, user_hash: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(user_hash).cloned())
    }

    async fn create_user_if_absent(&self, user_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let user = users
            .entry(user_hash.to_string())
            .or_insert_with(|| {
                debug!(user_hash = %user_hash, "User document inserted");
                User::new(user_hash.to_string())
            })
            .clone();
        Ok(user)
    }

    async fn append_ballot(
        &self,
        user_hash: &str,
        vote_hash: &str,
        topic: &str,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(user_hash) else {
            return Ok(None);
        };

        user.ballots.push(Ballot {
            vote_hash: vote_hash.to_string(),
            topic: topic.to_string(),
            submitted_at: self.clock.now(),
        });
        Ok(Some(user.clone()))
    }

    async fn find_ballot_for_topic(
        &self,
        user_hash: &str,
        topic: &str,
    ) -> Result<Option<Ballot>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .get(user_hash)
            .and_then(|user| user.ballot_for_topic(topic))
            .cloned())
    }

    async fn list_ballots(&self, user_hash: &str) -> Result<Option<Vec<Ballot>>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(user_hash).map(|user| user.ballots.clone()))
    }
}
