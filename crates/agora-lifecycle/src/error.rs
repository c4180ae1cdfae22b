//! Error types for the proposal/ballot lifecycle engine.
//!
//! Each admission pipeline and the query facade has its own error enum so
//! a failure always maps to exactly one machine-readable status code on
//! the wire. Store-layer failures are translated into the `Store` variant
//! at the call site; nothing is swallowed or retried here.

use thiserror::Error;

/// Machine-readable status code strings carried in every response.
pub mod status {
    /// Operation succeeded.
    pub const OK: &str = "OK";
    /// A proposal with this topic already exists and is open.
    pub const PROPOSAL_ALREADY_OPEN: &str = "PROPOSAL_ALREADY_OPEN";
    /// The proposal's voting window is closed.
    pub const PROPOSAL_EXPIRED: &str = "PROPOSAL_EXPIRED";
    /// No proposal exists for the given topic.
    pub const PROPOSAL_NOT_FOUND: &str = "PROPOSAL_NOT_FOUND";
    /// The user already cast a ballot on this topic.
    pub const DUPLICATE_VOTE_SUBMISSION: &str = "DUPLICATE_VOTE_SUBMISSION";
    /// The chosen option is not in the proposal's option set.
    pub const INVALID_OPTION: &str = "INVALID_OPTION";
    /// No user record exists for the given hash.
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    /// The sort field is not a sortable proposal field.
    pub const INVALID_SORT_BY_PARAM: &str = "INVALID_SORT_BY_PARAM";
    /// The sort direction is neither "asc" nor "desc".
    pub const INVALID_SORT_ORDER_PARAM: &str = "INVALID_SORT_ORDER_PARAM";
    /// The page limit is zero or negative.
    pub const LIMIT_ZERO_PARAM: &str = "LIMIT_ZERO_PARAM";
    /// The page offset is negative.
    pub const SKIP_ZERO_PARAM: &str = "SKIP_ZERO_PARAM";
    /// The page offset is past the last matching proposal.
    pub const PAGING_OUT_OF_BOUNDS: &str = "PAGING_OUT_OF_BOUNDS";
    /// The underlying store call failed.
    pub const STORE_ACCESS_ERROR: &str = "STORE_ACCESS_ERROR";
    /// Anything uncategorized (bad params, unknown method, ...).
    pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
}

/// Errors surfaced by the entity store gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A proposal with this topic already exists.
    #[error("Topic already exists: {0}")]
    DuplicateTopic(String),

    /// The underlying store call failed or the connection dropped.
    #[error("Store backend failure: {0}")]
    Backend(String),
}

/// Errors from the new-proposal admission pipeline.
#[derive(Debug, Error)]
pub enum ProposalAdmissionError {
    /// A proposal with this topic exists and is still open.
    #[error("Proposal already exists and is open: {0}")]
    AlreadyOpen(String),

    /// A proposal with this topic existed and was settled; topics are
    /// not reusable.
    #[error("Proposal is expired: {0}")]
    Expired(String),

    /// A store call failed during admission.
    #[error("Store access failure: {0}")]
    Store(#[from] StoreError),
}

impl ProposalAdmissionError {
    /// The wire status code for this failure.
    #[must_use]
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::AlreadyOpen(_) => status::PROPOSAL_ALREADY_OPEN,
            Self::Expired(_) => status::PROPOSAL_EXPIRED,
            Self::Store(_) => status::STORE_ACCESS_ERROR,
        }
    }
}

/// Errors from the new-ballot admission pipeline.
#[derive(Debug, Error)]
pub enum BallotAdmissionError {
    /// The user already has a ballot on this topic.
    #[error("Duplicate ballot submission for topic: {topic}")]
    DuplicateVote {
        /// The voting user.
        user_hash: String,
        /// The topic already voted on.
        topic: String,
    },

    /// No proposal exists for this topic.
    #[error("Proposal does not exist: {0}")]
    ProposalNotFound(String),

    /// The proposal's voting window is closed.
    #[error("Proposal is expired: {0}")]
    ProposalExpired(String),

    /// The chosen option is not a member of the proposal's option set.
    #[error("Invalid option \"{option}\" for topic: {topic}")]
    InvalidOption {
        /// The topic voted on.
        topic: String,
        /// The rejected option.
        option: String,
    },

    /// A store call failed during admission.
    #[error("Store access failure: {0}")]
    Store(#[from] StoreError),
}

impl BallotAdmissionError {
    /// The wire status code for this failure.
    #[must_use]
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::DuplicateVote { .. } => status::DUPLICATE_VOTE_SUBMISSION,
            Self::ProposalNotFound(_) => status::PROPOSAL_NOT_FOUND,
            Self::ProposalExpired(_) => status::PROPOSAL_EXPIRED,
            Self::InvalidOption { .. } => status::INVALID_OPTION,
            Self::Store(_) => status::STORE_ACCESS_ERROR,
        }
    }
}

/// Errors from confirmation recording and settlement.
///
/// These paths have no domain-specific rejection reasons: a missing
/// proposal at settlement time is a store-level condition, not a
/// client-correctable one.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// No proposal exists for the topic being settled.
    #[error("Proposal does not exist: {0}")]
    ProposalNotFound(String),

    /// A store call failed while applying the lifecycle write.
    #[error("Store access failure: {0}")]
    Store(#[from] StoreError),
}

impl SettlementError {
    /// The wire status code for this failure.
    #[must_use]
    pub fn status_code(&self) -> &'static str {
        // Both variants surface as store-access conditions on the wire.
        match self {
            Self::ProposalNotFound(_) | Self::Store(_) => status::STORE_ACCESS_ERROR,
        }
    }
}

/// Errors from the read-only query facade.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No proposal exists for the given topic.
    #[error("Proposal does not exist: {0}")]
    ProposalNotFound(String),

    /// No user record exists for the given hash.
    #[error("User does not exist: {0}")]
    UserNotFound(String),

    /// The requested sort field is not sortable.
    #[error("Invalid sort field: {0}")]
    InvalidSortBy(String),

    /// The requested sort direction is neither "asc" nor "desc".
    #[error("Invalid sort direction: {0}")]
    InvalidSortOrder(String),

    /// The page limit must be positive.
    #[error("Page limit must be positive, got {0}")]
    LimitZero(i64),

    /// The page offset must not be negative.
    #[error("Page offset must not be negative, got {0}")]
    NegativeSkip(i64),

    /// The page offset is past the last matching proposal.
    #[error("Page offset {skip} out of bounds for {total} matching proposals")]
    PagingOutOfBounds {
        /// The requested offset.
        skip: i64,
        /// The pre-page match count.
        total: u64,
    },

    /// A store call failed while reading.
    #[error("Store access failure: {0}")]
    Store(#[from] StoreError),
}

impl QueryError {
    /// The wire status code for this failure.
    #[must_use]
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::ProposalNotFound(_) => status::PROPOSAL_NOT_FOUND,
            Self::UserNotFound(_) => status::USER_NOT_FOUND,
            Self::InvalidSortBy(_) => status::INVALID_SORT_BY_PARAM,
            Self::InvalidSortOrder(_) => status::INVALID_SORT_ORDER_PARAM,
            Self::LimitZero(_) => status::LIMIT_ZERO_PARAM,
            Self::NegativeSkip(_) => status::SKIP_ZERO_PARAM,
            Self::PagingOutOfBounds { .. } => status::PAGING_OUT_OF_BOUNDS,
            Self::Store(_) => status::STORE_ACCESS_ERROR,
        }
    }
}
