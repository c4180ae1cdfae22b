//! Proposal lifecycle state machine.
//!
//! A proposal is `Open` from creation until settlement and `Settled`
//! afterwards; there is no transition out of `Settled`. While open (and,
//! for confirmations, even after settlement) the proposal accumulates
//! audit data:
//!
//! - `apply_confirmation` appends a block confirmation. Confirmations are
//!   legal in any phase; a late confirmation after settlement is audit
//!   data, not an error.
//! - `apply_settlement` freezes the tally, stamps `settled_at` and flips
//!   `expired`. The transition is driven solely by the external
//!   expiration signal; the engine runs no timers of its own.

use shared_types::{BlockConfirmation, Proposal, Tally, Timestamp};

/// The two lifecycle phases of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalPhase {
    /// Accepting ballots and confirmations.
    Open,
    /// Tally frozen; no further ballots.
    Settled,
}

impl ProposalPhase {
    /// Derive the phase from a proposal's persisted flags.
    #[must_use]
    pub fn of(proposal: &Proposal) -> Self {
        if proposal.expired {
            Self::Settled
        } else {
            Self::Open
        }
    }
}

/// Append a block confirmation to the proposal's audit log.
///
/// Valid in every phase; confirmations are never removed or mutated.
pub fn apply_confirmation(proposal: &mut Proposal, height: u64, length: u64) {
    proposal.confirmations.push(BlockConfirmation { height, length });
}

/// Transition the proposal to `Settled`, writing the reported tally.
///
/// The tally is trusted as reported; it is not recomputed from stored
/// ballots. Re-settling overwrites the previous result and timestamp but
/// never returns the proposal to `Open`.
pub fn apply_settlement(proposal: &mut Proposal, tally: Tally, now: Timestamp) {
    proposal.result = tally;
    proposal.expired = true;
    proposal.settled_at = Some(now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn proposal() -> Proposal {
        Proposal::new(
            "T1".to_string(),
            60,
            vec!["A".to_string(), "B".to_string()],
            1_000,
        )
    }

    fn tally(count: u64, votes: &[(&str, u64)]) -> Tally {
        let mut options = BTreeMap::new();
        for (option, n) in votes {
            options.insert((*option).to_string(), *n);
        }
        Tally::new(count, options)
    }

    #[test]
    fn test_phase_derivation() {
        let mut p = proposal();
        assert_eq!(ProposalPhase::of(&p), ProposalPhase::Open);

        apply_settlement(&mut p, tally(0, &[]), 2_000);
        assert_eq!(ProposalPhase::of(&p), ProposalPhase::Settled);
    }

    #[test]
    fn test_confirmations_accumulate_in_order() {
        let mut p = proposal();
        apply_confirmation(&mut p, 10, 10);
        apply_confirmation(&mut p, 11, 12);

        assert_eq!(p.confirmations.len(), 2);
        assert_eq!(p.confirmations[0], BlockConfirmation { height: 10, length: 10 });
        assert_eq!(p.confirmations[1], BlockConfirmation { height: 11, length: 12 });
    }

    #[test]
    fn test_confirmations_allowed_after_settlement() {
        let mut p = proposal();
        apply_settlement(&mut p, tally(1, &[("A", 1)]), 2_000);

        // Network lag can deliver a confirmation after the tally froze.
        apply_confirmation(&mut p, 99, 100);
        assert_eq!(p.confirmations.len(), 1);
        assert_eq!(ProposalPhase::of(&p), ProposalPhase::Settled);
    }

    #[test]
    fn test_settlement_freezes_tally() {
        let mut p = proposal();
        let t = tally(3, &[("A", 2), ("B", 1)]);
        apply_settlement(&mut p, t.clone(), 2_000);

        assert!(p.expired);
        assert_eq!(p.settled_at, Some(2_000));
        assert_eq!(p.result, t);
        assert!(p.result.is_consistent());
    }

    #[test]
    fn test_resettlement_never_reopens() {
        let mut p = proposal();
        apply_settlement(&mut p, tally(1, &[("A", 1)]), 2_000);
        apply_settlement(&mut p, tally(2, &[("A", 2)]), 3_000);

        // The second write overwrites the result but expired stays true.
        assert!(p.expired);
        assert_eq!(p.settled_at, Some(3_000));
        assert_eq!(p.result.count, 2);
    }
}
