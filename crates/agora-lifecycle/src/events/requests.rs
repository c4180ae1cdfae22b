//! Wire Request Messages
//!
//! Typed forms of the JSON parameters carried by `ClientRequest` bus
//! events. Field names are camelCase on the wire, matching the web
//! client's schema.

use serde::{Deserialize, Serialize};

/// Method name for [`ValidateProposalRequest`].
pub const METHOD_VALIDATE_PROPOSAL: &str = "validate_proposal";
/// Method name for [`CacheProposalRequest`].
pub const METHOD_CACHE_PROPOSAL: &str = "cache_proposal";
/// Method name for [`ValidateBallotRequest`].
pub const METHOD_VALIDATE_BALLOT: &str = "validate_ballot";
/// Method name for [`CacheBallotRequest`].
pub const METHOD_CACHE_BALLOT: &str = "cache_ballot";
/// Method name for [`GetProposalRequest`].
pub const METHOD_GET_PROPOSAL: &str = "get_proposal";
/// Method name for [`ListProposalsRequest`].
pub const METHOD_LIST_PROPOSALS: &str = "list_proposals";
/// Method name for [`GetUserBallotsRequest`].
pub const METHOD_GET_USER_BALLOTS: &str = "get_user_ballots";

/// Ask whether a topic may be claimed by a new proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateProposalRequest {
    /// Topic to claim.
    pub topic: String,
}

/// Persist a new proposal after a passing validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheProposalRequest {
    /// Topic to claim.
    pub topic: String,
    /// Voting window length in minutes.
    pub duration: u64,
    /// Valid ballot choices.
    pub options: Vec<String>,
}

/// Ask whether a user's ballot would be admitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateBallotRequest {
    /// Voting user.
    pub user_hash: String,
    /// Topic voted on.
    pub topic: String,
    /// Chosen option.
    pub option: String,
}

/// Append a previously validated ballot.
///
/// `option` is carried for symmetry with the validate call but plays no
/// role in the append; it was already checked in phase one.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheBallotRequest {
    /// Voting user.
    pub user_hash: String,
    /// Hash of the on-chain vote transaction.
    pub vote_hash: String,
    /// Topic voted on.
    pub topic: String,
    /// Chosen option (informational).
    #[serde(default)]
    pub option: Option<String>,
}

/// Fetch one proposal by topic.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProposalRequest {
    /// Topic to fetch.
    pub topic: String,
}

/// Lifecycle filter parameters for proposal listings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Restrict to settled (`true`) or open (`false`) proposals.
    #[serde(default)]
    pub expired: Option<bool>,
}

/// Sort parameters for proposal listings (validated at dispatch).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortParams {
    /// Field to sort by.
    pub sort_by: String,
    /// "asc" or "desc", case-insensitive.
    pub order: String,
}

/// Page window parameters for proposal listings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingParams {
    /// Number of matching proposals to skip.
    pub skip: i64,
    /// Maximum number of proposals to return.
    pub limit: i64,
}

impl Default for PagingParams {
    fn default() -> Self {
        // An omitted window is invalid input; zero limit is rejected by
        // the facade rather than silently returning everything.
        Self { skip: 0, limit: 0 }
    }
}

/// List proposals with filter, optional sort and paging.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProposalsRequest {
    /// Lifecycle filter; unset means no filtering.
    #[serde(default)]
    pub filter: Option<FilterParams>,
    /// Sort specification; unset means stable default ordering.
    #[serde(default)]
    pub sort: Option<SortParams>,
    /// Page window.
    #[serde(default)]
    pub paging: PagingParams,
}

/// List all ballots cached for a user.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserBallotsRequest {
    /// User to list ballots for.
    pub user_hash: String,
}
