//! Admission predicates for the two validation pipelines.
//!
//! These are the pure decision steps; the services run them in order
//! against values fetched from the store and short-circuit on the first
//! failure. Keeping them free of I/O makes the ordering rules directly
//! testable.

use shared_types::{Ballot, Proposal};

use crate::error::{BallotAdmissionError, ProposalAdmissionError};

/// Decide whether a topic may be claimed by a new proposal.
///
/// An open proposal blocks the topic; a settled one blocks it
/// permanently (topics are never reused).
pub fn ensure_topic_unclaimed(
    topic: &str,
    existing: Option<&Proposal>,
) -> Result<(), ProposalAdmissionError> {
    match existing {
        None => Ok(()),
        Some(proposal) if proposal.expired => {
            Err(ProposalAdmissionError::Expired(topic.to_string()))
        }
        Some(_) => Err(ProposalAdmissionError::AlreadyOpen(topic.to_string())),
    }
}

/// Reject a ballot when the user already voted on the topic.
pub fn ensure_no_prior_ballot(
    user_hash: &str,
    topic: &str,
    prior: Option<&Ballot>,
) -> Result<(), BallotAdmissionError> {
    if prior.is_some() {
        return Err(BallotAdmissionError::DuplicateVote {
            user_hash: user_hash.to_string(),
            topic: topic.to_string(),
        });
    }
    Ok(())
}

/// Require an existing, still-open proposal for the topic.
///
/// Returns the proposal so the next step can check option membership
/// without a second store read.
pub fn ensure_open_proposal<'a>(
    topic: &str,
    proposal: Option<&'a Proposal>,
) -> Result<&'a Proposal, BallotAdmissionError> {
    let proposal =
        proposal.ok_or_else(|| BallotAdmissionError::ProposalNotFound(topic.to_string()))?;
    if proposal.expired {
        return Err(BallotAdmissionError::ProposalExpired(topic.to_string()));
    }
    Ok(proposal)
}

/// Require the chosen option to be a member of the proposal's option set.
pub fn ensure_valid_option(proposal: &Proposal, option: &str) -> Result<(), BallotAdmissionError> {
    if !proposal.has_option(option) {
        return Err(BallotAdmissionError::InvalidOption {
            topic: proposal.topic.clone(),
            option: option.to_string(),
        });
    }
    Ok(())
}
