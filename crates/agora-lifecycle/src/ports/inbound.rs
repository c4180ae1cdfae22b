//! Inbound Ports (Driving Ports)
//!
//! These traits define the API the transport layer uses to drive the
//! lifecycle engine. Each method corresponds to one wire operation;
//! validate and cache are deliberately separate calls so a client can
//! validate before committing wallet-level side effects upstream.

use std::collections::BTreeMap;

use async_trait::async_trait;
use shared_types::{Ballot, Proposal, User};

use crate::domain::{Paging, ProposalFilter, SortSpec};
use crate::error::{BallotAdmissionError, ProposalAdmissionError, QueryError, SettlementError};

/// New-proposal admission and creation (Driving Port).
#[async_trait]
pub trait ProposalAdmission: Send + Sync {
    /// Run the admission pipeline for a new topic. No side effects.
    async fn validate_new_proposal(&self, topic: &str) -> Result<(), ProposalAdmissionError>;

    /// Persist a new open proposal for a previously validated topic.
    async fn cache_proposal(
        &self,
        topic: &str,
        duration: u64,
        options: Vec<String>,
    ) -> Result<Proposal, ProposalAdmissionError>;
}

/// New-ballot admission and caching (Driving Port).
#[async_trait]
pub trait BallotAdmission: Send + Sync {
    /// Run the ordered ballot checks. Creates the user record when
    /// absent (a side effect that happens even if a later check fails).
    async fn validate_new_ballot(
        &self,
        user_hash: &str,
        topic: &str,
        option: &str,
    ) -> Result<(), BallotAdmissionError>;

    /// Append a previously validated ballot to the user's log.
    ///
    /// Returns `None` when the user record vanished between validate and
    /// cache; the append is then a no-op, not a failure.
    async fn cache_ballot(
        &self,
        user_hash: &str,
        vote_hash: &str,
        topic: &str,
    ) -> Result<Option<User>, BallotAdmissionError>;
}

/// Lifecycle writes driven by the blockchain observer (Driving Port).
#[async_trait]
pub trait LifecycleApi: Send + Sync {
    /// Record a block confirmation against a proposal.
    ///
    /// Appends regardless of lifecycle phase; a missing proposal makes
    /// the call a logged no-op (`None`).
    async fn record_confirmation(
        &self,
        topic: &str,
        height: u64,
        length: u64,
    ) -> Result<Option<Proposal>, SettlementError>;

    /// Seal a proposal with the tally reported by the expiration signal.
    async fn settle(
        &self,
        topic: &str,
        count: u64,
        options: BTreeMap<String, u64>,
    ) -> Result<Proposal, SettlementError>;
}

/// Read-only proposal queries (Driving Port).
#[async_trait]
pub trait ProposalQueries: Send + Sync {
    /// Fetch one proposal by topic.
    async fn proposal_detail(&self, topic: &str) -> Result<Proposal, QueryError>;

    /// List proposals with filter, optional sort and mandatory paging.
    ///
    /// The match count is computed before the page is fetched and the
    /// paging bounds are checked against that count.
    async fn proposal_list(
        &self,
        filter: ProposalFilter,
        sort: Option<SortSpec>,
        paging: Paging,
    ) -> Result<Vec<Proposal>, QueryError>;
}

/// Read-only ballot queries (Driving Port).
#[async_trait]
pub trait BallotQueries: Send + Sync {
    /// List a user's ballots.
    ///
    /// A user with zero ballots yields an empty list; an absent user
    /// record is a `UserNotFound` rejection.
    async fn user_ballots(&self, user_hash: &str) -> Result<Vec<Ballot>, QueryError>;
}
