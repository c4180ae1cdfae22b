//! Outbound Ports (Driven Ports)
//!
//! These traits define the dependencies the lifecycle engine needs from
//! external components: the document store holding proposals and users,
//! and a time source.
//!
//! The store is the single arbitration point. Conditional writes
//! (`append_confirmation`, `settle_proposal`, `append_ballot`) model an
//! atomic find-and-update: apply the change to the document matching the
//! key and return the updated document, or `None` when no document
//! matched. The engine layers no locks of its own on top.

use async_trait::async_trait;
use shared_types::{Ballot, Proposal, Tally, Timestamp, User};

use crate::domain::{Paging, ProposalFilter, SortSpec};
use crate::error::StoreError;

/// Store operations on the proposals collection (Driven Port).
#[async_trait]
pub trait ProposalStore: Send + Sync {
    /// Look up a proposal by topic.
    async fn find_proposal(&self, topic: &str) -> Result<Option<Proposal>, StoreError>;

    /// Insert a new proposal.
    ///
    /// Fails with `StoreError::DuplicateTopic` when the topic is taken;
    /// creation timestamps are stamped by the store, never by callers.
    async fn create_proposal(
        &self,
        topic: &str,
        duration: u64,
        options: Vec<String>,
    ) -> Result<Proposal, StoreError>;

    /// Append a block confirmation to the proposal's audit log.
    ///
    /// Returns the updated proposal, or `None` when no proposal exists
    /// for the topic.
    async fn append_confirmation(
        &self,
        topic: &str,
        height: u64,
        length: u64,
    ) -> Result<Option<Proposal>, StoreError>;

    /// Write the final tally and mark the proposal settled.
    ///
    /// Returns the updated proposal, or `None` when no proposal exists
    /// for the topic.
    async fn settle_proposal(
        &self,
        topic: &str,
        tally: Tally,
    ) -> Result<Option<Proposal>, StoreError>;

    /// List proposals matching a filter, sorted and paged.
    async fn list_proposals(
        &self,
        filter: ProposalFilter,
        sort: Option<SortSpec>,
        paging: Paging,
    ) -> Result<Vec<Proposal>, StoreError>;

    /// Count proposals matching a filter.
    async fn count_proposals(&self, filter: ProposalFilter) -> Result<u64, StoreError>;
}

/// Store operations on the users collection (Driven Port).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by hash.
    async fn find_user(&self, user_hash: &str) -> Result<Option<User>, StoreError>;

    /// Fetch the user, creating an empty record when absent.
    async fn create_user_if_absent(&self, user_hash: &str) -> Result<User, StoreError>;

    /// Append a ballot to the user's log.
    ///
    /// Returns the updated user, or `None` when no user record exists.
    /// Submission timestamps are stamped by the store.
    async fn append_ballot(
        &self,
        user_hash: &str,
        vote_hash: &str,
        topic: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Find the user's ballot for a topic, if any.
    ///
    /// `None` covers both "user absent" and "user has no ballot on this
    /// topic"; the duplicate check only needs presence.
    async fn find_ballot_for_topic(
        &self,
        user_hash: &str,
        topic: &str,
    ) -> Result<Option<Ballot>, StoreError>;

    /// List all ballots for a user.
    ///
    /// Returns `None` when the user record is absent, distinguishing it
    /// from a user with an empty ballot log.
    async fn list_ballots(&self, user_hash: &str) -> Result<Option<Vec<Ballot>>, StoreError>;
}

/// Time source for store-side timestamps (Driven Port).
///
/// Injectable so tests can pin the clock.
pub trait TimeSource: Send + Sync {
    /// Current unix time in seconds.
    fn now(&self) -> Timestamp;
}
