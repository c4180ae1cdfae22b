//! Wire Response Messages
//!
//! Every operation answers with a structured message carrying a success
//! flag and a status code string; domain rejections are responses, never
//! transport faults. Query responses additionally carry serializable
//! views of the stored entities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::{Ballot, BlockConfirmation, Proposal, Tally, Timestamp};

use crate::error::status;

/// Response to a validate operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    /// Whether the admission pipeline passed.
    pub validation: bool,
    /// Machine-readable status code.
    pub status: String,
}

impl ValidationResponse {
    /// A passing validation.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            validation: true,
            status: status::OK.to_string(),
        }
    }

    /// A rejected validation with the given status code.
    #[must_use]
    pub fn rejected(status: &str) -> Self {
        Self {
            validation: false,
            status: status.to_string(),
        }
    }
}

/// Response to a cache/report operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedResponse {
    /// Whether the write was applied.
    pub cached: bool,
    /// Machine-readable status code.
    pub status: String,
}

impl CachedResponse {
    /// A successful write.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            cached: true,
            status: status::OK.to_string(),
        }
    }

    /// A failed write with the given status code.
    #[must_use]
    pub fn failed(status: &str) -> Self {
        Self {
            cached: false,
            status: status.to_string(),
        }
    }
}

/// Serializable view of a block confirmation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationView {
    /// Block height.
    pub height: u64,
    /// Chain length at observation time.
    pub length: u64,
}

impl From<&BlockConfirmation> for ConfirmationView {
    fn from(confirmation: &BlockConfirmation) -> Self {
        Self {
            height: confirmation.height,
            length: confirmation.length,
        }
    }
}

/// Serializable view of a tally.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyView {
    /// Total votes counted.
    pub count: u64,
    /// Votes per option.
    pub options: BTreeMap<String, u64>,
}

impl From<&Tally> for TallyView {
    fn from(tally: &Tally) -> Self {
        Self {
            count: tally.count,
            options: tally.options.clone(),
        }
    }
}

/// Serializable view of a proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalView {
    /// Topic identity key.
    pub topic: String,
    /// Voting window length in minutes.
    pub duration: u64,
    /// Valid ballot choices.
    pub options: Vec<String>,
    /// Creation time (unix seconds).
    pub created_at: Timestamp,
    /// Window close time (unix seconds).
    pub expired_at: Timestamp,
    /// Settlement time, when settled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<Timestamp>,
    /// Lifecycle phase flag.
    pub expired: bool,
    /// Observed chain confirmations.
    pub block_confirmations: Vec<ConfirmationView>,
    /// Final tally (zero until settlement).
    pub result: TallyView,
}

impl From<&Proposal> for ProposalView {
    fn from(proposal: &Proposal) -> Self {
        Self {
            topic: proposal.topic.clone(),
            duration: proposal.duration,
            options: proposal.options.clone(),
            created_at: proposal.created_at,
            expired_at: proposal.expired_at,
            settled_at: proposal.settled_at,
            expired: proposal.expired,
            block_confirmations: proposal.confirmations.iter().map(Into::into).collect(),
            result: TallyView::from(&proposal.result),
        }
    }
}

/// Serializable view of a ballot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotView {
    /// Hash of the on-chain vote transaction.
    pub vote_hash: String,
    /// Topic voted on.
    pub topic: String,
    /// Submission time (unix seconds).
    pub submitted_at: Timestamp,
}

impl From<&Ballot> for BallotView {
    fn from(ballot: &Ballot) -> Self {
        Self {
            vote_hash: ballot.vote_hash.clone(),
            topic: ballot.topic.clone(),
            submitted_at: ballot.submitted_at,
        }
    }
}

/// Response to a single-proposal query.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDetailResponse {
    /// Whether the query succeeded.
    pub queried: bool,
    /// Machine-readable status code.
    pub status: String,
    /// The proposal, when found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<ProposalView>,
}

impl ProposalDetailResponse {
    /// A successful lookup.
    #[must_use]
    pub fn ok(proposal: &Proposal) -> Self {
        Self {
            queried: true,
            status: status::OK.to_string(),
            proposal: Some(ProposalView::from(proposal)),
        }
    }

    /// A failed lookup with the given status code.
    #[must_use]
    pub fn failed(status: &str) -> Self {
        Self {
            queried: false,
            status: status.to_string(),
            proposal: None,
        }
    }
}

/// Response to a proposal listing query.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalListResponse {
    /// Whether the query succeeded.
    pub queried: bool,
    /// Machine-readable status code.
    pub status: String,
    /// The requested page, empty on failure.
    pub proposal_list: Vec<ProposalView>,
}

impl ProposalListResponse {
    /// A successful listing.
    #[must_use]
    pub fn ok(proposals: &[Proposal]) -> Self {
        Self {
            queried: true,
            status: status::OK.to_string(),
            proposal_list: proposals.iter().map(Into::into).collect(),
        }
    }

    /// A failed listing with the given status code.
    #[must_use]
    pub fn failed(status: &str) -> Self {
        Self {
            queried: false,
            status: status.to_string(),
            proposal_list: Vec::new(),
        }
    }
}

/// Response to a user-ballots query.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBallotsResponse {
    /// Whether the query succeeded.
    pub queried: bool,
    /// Machine-readable status code.
    pub status: String,
    /// The user's ballots, empty on failure or for a fresh user.
    pub ballots: Vec<BallotView>,
}

impl UserBallotsResponse {
    /// A successful listing.
    #[must_use]
    pub fn ok(ballots: &[Ballot]) -> Self {
        Self {
            queried: true,
            status: status::OK.to_string(),
            ballots: ballots.iter().map(Into::into).collect(),
        }
    }

    /// A failed listing with the given status code.
    #[must_use]
    pub fn failed(status: &str) -> Self {
        Self {
            queried: false,
            status: status.to_string(),
            ballots: Vec::new(),
        }
    }
}
