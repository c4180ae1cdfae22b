//! Query parameters for the proposal listing facade.
//!
//! Sort and paging parameters arrive as untrusted strings/integers from
//! the wire; everything here validates at the boundary and produces a
//! typed rejection before any store round trip happens. The paging
//! bounds check runs against the pre-page match count.

use std::cmp::Ordering;

use shared_types::Proposal;

use crate::error::QueryError;

/// Filter for proposal listings.
///
/// `expired` is tri-state: unset means no filtering on lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProposalFilter {
    /// Restrict to settled (`true`) or open (`false`) proposals.
    pub expired: Option<bool>,
}

impl ProposalFilter {
    /// Whether a proposal passes this filter.
    #[must_use]
    pub fn matches(&self, proposal: &Proposal) -> bool {
        match self.expired {
            Some(expired) => proposal.expired == expired,
            None => true,
        }
    }
}

/// Proposal fields a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Sort by topic string.
    Topic,
    /// Sort by voting window length.
    Duration,
    /// Sort by creation time.
    CreatedAt,
    /// Sort by window close time.
    ExpiredAt,
    /// Sort by lifecycle phase flag.
    Expired,
}

impl SortField {
    /// Parse a wire sort-field parameter (accepts both snake and camel
    /// case, case-insensitively).
    pub fn from_param(param: &str) -> Result<Self, QueryError> {
        match param.to_ascii_lowercase().as_str() {
            "topic" => Ok(Self::Topic),
            "duration" => Ok(Self::Duration),
            "createdat" | "created_at" => Ok(Self::CreatedAt),
            "expiredat" | "expired_at" => Ok(Self::ExpiredAt),
            "expired" => Ok(Self::Expired),
            _ => Err(QueryError::InvalidSortBy(param.to_string())),
        }
    }
}

/// Sort direction, restricted to "asc"/"desc" (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parse a wire sort-direction parameter.
    pub fn from_param(param: &str) -> Result<Self, QueryError> {
        match param.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(QueryError::InvalidSortOrder(param.to_string())),
        }
    }
}

/// A validated sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by.
    pub field: SortField,
    /// Direction to sort in.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Compare two proposals under this specification.
    #[must_use]
    pub fn compare(&self, a: &Proposal, b: &Proposal) -> Ordering {
        let ordering = match self.field {
            SortField::Topic => a.topic.cmp(&b.topic),
            SortField::Duration => a.duration.cmp(&b.duration),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::ExpiredAt => a.expired_at.cmp(&b.expired_at),
            SortField::Expired => a.expired.cmp(&b.expired),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Page window for proposal listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// Number of matching proposals to skip.
    pub skip: i64,
    /// Maximum number of proposals to return.
    pub limit: i64,
}

impl Paging {
    /// Validate the window parameters themselves (no store knowledge).
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.limit <= 0 {
            return Err(QueryError::LimitZero(self.limit));
        }
        if self.skip < 0 {
            return Err(QueryError::NegativeSkip(self.skip));
        }
        Ok(())
    }

    /// Check the offset against the pre-page match count.
    ///
    /// An empty result set never pages out of bounds; skipping past a
    /// non-empty one does.
    pub fn check_bounds(&self, total: u64) -> Result<(), QueryError> {
        if total > 0 && self.skip as u64 >= total {
            return Err(QueryError::PagingOutOfBounds {
                skip: self.skip,
                total,
            });
        }
        Ok(())
    }
}
