//! # Core Domain Entities
//!
//! Defines the governance entities shared by every crate in the workspace.
//!
//! ## Clusters
//!
//! - **Proposals**: `Proposal`, `BlockConfirmation`, `Tally`
//! - **Users**: `User`, `Ballot`
//!
//! A `Proposal` is keyed by its globally unique `topic` and a `User` by its
//! globally unique `user_hash`. Both are append-only after creation except
//! for the single settlement write on a proposal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Seconds in one minute (proposal durations are expressed in minutes).
pub const SECONDS_PER_MINUTE: u64 = 60;

/// A blockchain confirmation reported by the external chain observer.
///
/// Confirmations are audit data only; they never influence ballot
/// admission or settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfirmation {
    /// Block height on the observed chain.
    pub height: u64,
    /// Chain length at the time the block was observed.
    pub length: u64,
}

/// Final per-option vote counts for a settled proposal.
///
/// Defaults to the zero tally (`count == 0`, empty options) until the
/// proposal is settled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Total number of votes counted.
    pub count: u64,
    /// Votes per option.
    pub options: BTreeMap<String, u64>,
}

impl Tally {
    /// Build a tally from a reported total and per-option counts.
    #[must_use]
    pub fn new(count: u64, options: BTreeMap<String, u64>) -> Self {
        Self { count, options }
    }

    /// Whether the total matches the sum of the per-option counts.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.count == self.options.values().sum::<u64>()
    }

    /// Whether this is the zero tally (no settlement recorded yet).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.count == 0 && self.options.is_empty()
    }
}

/// A time-boxed governance proposal with a fixed option set.
///
/// `topic`, `duration` and `options` are immutable once created.
/// `expired_at` is derived from `created_at` and `duration`, never
/// supplied by a caller. `confirmations` is append-only; `result` and
/// `settled_at` are written exactly once at settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Globally unique identity key.
    pub topic: String,
    /// Voting window length in minutes.
    pub duration: u64,
    /// The only valid ballot choices, in creation order.
    pub options: Vec<String>,
    /// When the proposal was created.
    pub created_at: Timestamp,
    /// When the voting window closes (`created_at + duration` minutes).
    pub expired_at: Timestamp,
    /// When settlement wrote the final tally, if it has happened.
    pub settled_at: Option<Timestamp>,
    /// False until settlement marks the proposal closed.
    pub expired: bool,
    /// Append-only log of observed chain confirmations.
    pub confirmations: Vec<BlockConfirmation>,
    /// Final tally; the zero tally before settlement.
    pub result: Tally,
}

impl Proposal {
    /// Create a new open proposal, deriving `expired_at`.
    #[must_use]
    pub fn new(topic: String, duration: u64, options: Vec<String>, created_at: Timestamp) -> Self {
        let expired_at = created_at + duration * SECONDS_PER_MINUTE;
        Self {
            topic,
            duration,
            options,
            created_at,
            expired_at,
            settled_at: None,
            expired: false,
            confirmations: Vec::new(),
            result: Tally::default(),
        }
    }

    /// Whether the proposal is still accepting ballots.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.expired
    }

    /// Whether `option` is a member of the proposal's option set.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// One user's vote on one proposal.
///
/// Immutable once appended to the owning user's ballot log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Hash of the on-chain vote transaction.
    pub vote_hash: String,
    /// Topic of the proposal the vote was cast on.
    pub topic: String,
    /// When the ballot was cached.
    pub submitted_at: Timestamp,
}

/// A voting user, created lazily on first ballot interaction.
///
/// The ballot log is append-only; the at-most-one-ballot-per-topic rule
/// is enforced by the admission pipeline, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Globally unique identity key.
    pub user_hash: String,
    /// Ballots in submission order.
    pub ballots: Vec<Ballot>,
}

impl User {
    /// Create a user with an empty ballot log.
    #[must_use]
    pub fn new(user_hash: String) -> Self {
        Self {
            user_hash,
            ballots: Vec::new(),
        }
    }

    /// Find this user's ballot for `topic`, if one was cached.
    #[must_use]
    pub fn ballot_for_topic(&self, topic: &str) -> Option<&Ballot> {
        self.ballots.iter().find(|b| b.topic == topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_derived_from_duration() {
        let proposal = Proposal::new(
            "T1".to_string(),
            60,
            vec!["A".to_string(), "B".to_string()],
            1_000,
        );

        assert_eq!(proposal.expired_at, 1_000 + 60 * 60);
        assert!(proposal.is_open());
        assert!(proposal.settled_at.is_none());
        assert!(proposal.result.is_zero());
    }

    #[test]
    fn test_option_membership() {
        let proposal = Proposal::new(
            "T1".to_string(),
            5,
            vec!["yes".to_string(), "no".to_string()],
            0,
        );

        assert!(proposal.has_option("yes"));
        assert!(proposal.has_option("no"));
        assert!(!proposal.has_option("maybe"));
        assert!(!proposal.has_option("YES"));
    }

    #[test]
    fn test_tally_consistency() {
        let mut options = BTreeMap::new();
        options.insert("A".to_string(), 3);
        options.insert("B".to_string(), 2);

        assert!(Tally::new(5, options.clone()).is_consistent());
        assert!(!Tally::new(4, options).is_consistent());
        assert!(Tally::default().is_consistent());
    }

    #[test]
    fn test_ballot_lookup_by_topic() {
        let mut user = User::new("U1".to_string());
        assert!(user.ballot_for_topic("T1").is_none());

        user.ballots.push(Ballot {
            vote_hash: "0xabc".to_string(),
            topic: "T1".to_string(),
            submitted_at: 42,
        });

        assert_eq!(
            user.ballot_for_topic("T1").map(|b| b.vote_hash.as_str()),
            Some("0xabc")
        );
        assert!(user.ballot_for_topic("T2").is_none());
    }

    #[test]
    fn test_proposal_serde_round_trip() {
        let proposal = Proposal::new(
            "T1".to_string(),
            60,
            vec!["A".to_string(), "B".to_string()],
            1_000,
        );

        let json = serde_json::to_string(&proposal).expect("serialize");
        let back: Proposal = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, proposal);
    }
}
