//! Ballot Service
//!
//! Orchestrates ballot admission and ballot queries over the injected
//! store gateways. The four admission checks run in a fixed order and
//! short-circuit on the first failure; each maps to a distinct status
//! code for diagnosability.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{Ballot, User};
use tracing::{debug, error, info, warn};

use crate::domain::admission::{ensure_no_prior_ballot, ensure_open_proposal, ensure_valid_option};
use crate::error::{BallotAdmissionError, QueryError};
use crate::ports::inbound::{BallotAdmission, BallotQueries};
use crate::ports::outbound::{ProposalStore, UserStore};

/// Ballot service implementation over the two store gateways.
pub struct BallotService<P: ProposalStore, U: UserStore> {
    /// Proposals collection gateway.
    proposal_store: Arc<P>,
    /// Users collection gateway.
    user_store: Arc<U>,
}

impl<P: ProposalStore, U: UserStore> BallotService<P, U> {
    /// Create a new service with the given stores.
    pub fn new(proposal_store: Arc<P>, user_store: Arc<U>) -> Self {
        Self {
            proposal_store,
            user_store,
        }
    }
}

#[async_trait]
impl<P, U> BallotAdmission for BallotService<P, U>
where
    P: ProposalStore + 'static,
    U: UserStore + 'static,
{
    async fn validate_new_ballot(
        &self,
        user_hash: &str,
        topic: &str,
        option: &str,
    ) -> Result<(), BallotAdmissionError> {
        debug!(user_hash = %user_hash, topic = %topic, option = %option, "Starting ballot validation");

        // Check 1: ensure the user record exists. This write happens
        // even when a later check rejects the ballot; user creation has
        // no dedicated registration step in this domain.
        self.user_store
            .create_user_if_absent(user_hash)
            .await
            .map_err(|e| {
                error!(user_hash = %user_hash, error = %e, "Failed to check/create user");
                e
            })?;

        // Check 2: one ballot per (user, topic).
        let prior = self
            .user_store
            .find_ballot_for_topic(user_hash, topic)
            .await
            .map_err(|e| {
                error!(user_hash = %user_hash, topic = %topic, error = %e, "Store access error during duplicate vote validation");
                e
            })?;
        ensure_no_prior_ballot(user_hash, topic, prior.as_ref()).map_err(|rejection| {
            warn!(user_hash = %user_hash, topic = %topic, status = rejection.status_code(), "Duplicate ballot submission");
            rejection
        })?;

        // Check 3: the proposal exists and is still open.
        let proposal = self.proposal_store.find_proposal(topic).await.map_err(|e| {
            error!(topic = %topic, error = %e, "Store access error during proposal existence validation");
            e
        })?;
        let proposal = ensure_open_proposal(topic, proposal.as_ref()).map_err(|rejection| {
            warn!(topic = %topic, status = rejection.status_code(), "Ballot validation failed on proposal check");
            rejection
        })?;

        // Check 4: the chosen option is a member of the option set.
        ensure_valid_option(proposal, option).map_err(|rejection| {
            warn!(
                user_hash = %user_hash,
                topic = %topic,
                option = %option,
                status = rejection.status_code(),
                "Invalid option selected"
            );
            rejection
        })?;

        info!(user_hash = %user_hash, topic = %topic, option = %option, "All ballot validations passed");
        Ok(())
    }

    async fn cache_ballot(
        &self,
        user_hash: &str,
        vote_hash: &str,
        topic: &str,
    ) -> Result<Option<User>, BallotAdmissionError> {
        debug!(user_hash = %user_hash, vote_hash = %vote_hash, topic = %topic, "Attempting to cache ballot");

        let updated = self
            .user_store
            .append_ballot(user_hash, vote_hash, topic)
            .await
            .map_err(|e| {
                error!(
                    user_hash = %user_hash,
                    vote_hash = %vote_hash,
                    topic = %topic,
                    error = %e,
                    "Store access error during ballot caching"
                );
                e
            })?;

        match &updated {
            Some(_) => info!(user_hash = %user_hash, topic = %topic, vote_hash = %vote_hash, "Ballot successfully cached"),
            None => warn!(user_hash = %user_hash, topic = %topic, "User not found; could not add ballot"),
        }

        Ok(updated)
    }
}

#[async_trait]
impl<P, U> BallotQueries for BallotService<P, U>
where
    P: ProposalStore + 'static,
    U: UserStore + 'static,
{
    async fn user_ballots(&self, user_hash: &str) -> Result<Vec<Ballot>, QueryError> {
        debug!(user_hash = %user_hash, "Attempting to retrieve ballots");

        let ballots = self.user_store.list_ballots(user_hash).await.map_err(|e| {
            error!(user_hash = %user_hash, error = %e, "Store access error during ballot retrieval");
            e
        })?;

        let Some(ballots) = ballots else {
            warn!(user_hash = %user_hash, "User not found");
            return Err(QueryError::UserNotFound(user_hash.to_string()));
        };

        info!(
            user_hash = %user_hash,
            count = ballots.len(),
            "Successfully retrieved ballots"
        );
        Ok(ballots)
    }
}
