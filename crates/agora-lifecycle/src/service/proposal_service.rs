//! Proposal Service
//!
//! Orchestrates proposal admission, lifecycle writes and proposal
//! queries over the injected store gateway. The service is stateless
//! after construction; every ordering guarantee comes from the store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{Proposal, Tally};
use tracing::{debug, error, info, warn};

use crate::domain::admission::ensure_topic_unclaimed;
use crate::domain::{Paging, ProposalFilter, SortSpec};
use crate::error::{ProposalAdmissionError, QueryError, SettlementError};
use crate::ports::inbound::{LifecycleApi, ProposalAdmission, ProposalQueries};
use crate::ports::outbound::ProposalStore;

/// Proposal service implementation over a store gateway.
pub struct ProposalService<S: ProposalStore> {
    /// Entity store gateway (driven port).
    store: Arc<S>,
}

impl<S: ProposalStore> ProposalService<S> {
    /// Create a new service with the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: ProposalStore + 'static> ProposalAdmission for ProposalService<S> {
    async fn validate_new_proposal(&self, topic: &str) -> Result<(), ProposalAdmissionError> {
        debug!(topic = %topic, "Starting validation for new proposal");

        let existing = self.store.find_proposal(topic).await.map_err(|e| {
            error!(topic = %topic, error = %e, "Store access error during proposal existence check");
            e
        })?;

        if let Err(rejection) = ensure_topic_unclaimed(topic, existing.as_ref()) {
            warn!(
                topic = %topic,
                status = rejection.status_code(),
                "Proposal validation failed during new proposal check"
            );
            return Err(rejection);
        }

        info!(topic = %topic, "Proposal is valid for creation");
        Ok(())
    }

    async fn cache_proposal(
        &self,
        topic: &str,
        duration: u64,
        options: Vec<String>,
    ) -> Result<Proposal, ProposalAdmissionError> {
        debug!(topic = %topic, duration = duration, "Attempting to save new proposal");

        let proposal = self
            .store
            .create_proposal(topic, duration, options)
            .await
            .map_err(|e| {
                error!(
                    topic = %topic,
                    duration = duration,
                    error = %e,
                    "Store access error during new proposal saving"
                );
                e
            })?;

        info!(topic = %topic, "New proposal successfully saved");
        Ok(proposal)
    }
}

#[async_trait]
impl<S: ProposalStore + 'static> LifecycleApi for ProposalService<S> {
    async fn record_confirmation(
        &self,
        topic: &str,
        height: u64,
        length: u64,
    ) -> Result<Option<Proposal>, SettlementError> {
        debug!(topic = %topic, height = height, length = length, "Attempting to cache block confirmation");

        let updated = self
            .store
            .append_confirmation(topic, height, length)
            .await
            .map_err(|e| {
                error!(topic = %topic, height = height, error = %e, "Store access error during block caching");
                e
            })?;

        match &updated {
            Some(_) => info!(topic = %topic, height = height, "Block confirmation successfully cached"),
            None => warn!(topic = %topic, "No proposal found for topic; confirmation dropped"),
        }

        Ok(updated)
    }

    async fn settle(
        &self,
        topic: &str,
        count: u64,
        options: BTreeMap<String, u64>,
    ) -> Result<Proposal, SettlementError> {
        debug!(topic = %topic, count = count, "Attempting to save expired proposal result");

        let tally = Tally::new(count, options);
        if !tally.is_consistent() {
            // The reporter's total is trusted either way; flag the skew.
            warn!(
                topic = %topic,
                count = count,
                "Reported tally total does not match per-option sum"
            );
        }

        let settled = self
            .store
            .settle_proposal(topic, tally)
            .await
            .map_err(|e| {
                error!(topic = %topic, count = count, error = %e, "Store access error during saving vote results");
                e
            })?;

        let Some(proposal) = settled else {
            warn!(topic = %topic, "Failed to save vote result; no proposal found for topic");
            return Err(SettlementError::ProposalNotFound(topic.to_string()));
        };

        info!(topic = %topic, count = count, "Vote results successfully saved; proposal marked expired");
        Ok(proposal)
    }
}

#[async_trait]
impl<S: ProposalStore + 'static> ProposalQueries for ProposalService<S> {
    async fn proposal_detail(&self, topic: &str) -> Result<Proposal, QueryError> {
        debug!(topic = %topic, "Attempting to retrieve proposal");

        let proposal = self.store.find_proposal(topic).await.map_err(|e| {
            error!(topic = %topic, error = %e, "Store access error during proposal retrieval");
            e
        })?;

        let Some(proposal) = proposal else {
            warn!(topic = %topic, "Proposal not found");
            return Err(QueryError::ProposalNotFound(topic.to_string()));
        };

        info!(topic = %topic, "Successfully retrieved proposal");
        Ok(proposal)
    }

    async fn proposal_list(
        &self,
        filter: ProposalFilter,
        sort: Option<SortSpec>,
        paging: Paging,
    ) -> Result<Vec<Proposal>, QueryError> {
        debug!(
            expired = ?filter.expired,
            skip = paging.skip,
            limit = paging.limit,
            "Attempting to retrieve filtered proposals"
        );

        paging.validate()?;

        // Two round trips: count first, page second. The bounds check
        // uses the pre-page count.
        let total = self.store.count_proposals(filter).await.map_err(|e| {
            error!(error = %e, "Store access error during proposal count");
            e
        })?;
        paging.check_bounds(total)?;

        let proposals = self
            .store
            .list_proposals(filter, sort, paging)
            .await
            .map_err(|e| {
                error!(error = %e, "Store access error during filtered proposal retrieval");
                e
            })?;

        info!(
            returned = proposals.len(),
            total = total,
            "Retrieved filtered proposals"
        );
        Ok(proposals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::InMemoryStore;
    use crate::adapters::time::FixedTimeSource;
    use crate::domain::{SortDirection, SortField};
    use crate::error::status;

    fn service() -> (ProposalService<InMemoryStore>, Arc<FixedTimeSource>) {
        let clock = Arc::new(FixedTimeSource::new(1_000));
        let store = Arc::new(InMemoryStore::new(clock.clone()));
        (ProposalService::new(store), clock)
    }

    fn tally(votes: &[(&str, u64)]) -> BTreeMap<String, u64> {
        votes.iter().map(|(o, n)| ((*o).to_string(), *n)).collect()
    }

    #[tokio::test]
    async fn test_validate_then_cache_never_conflicts() {
        let (service, _clock) = service();

        service.validate_new_proposal("T1").await.unwrap();
        let proposal = service
            .cache_proposal("T1", 60, vec!["A".to_string(), "B".to_string()])
            .await
            .unwrap();

        assert_eq!(proposal.topic, "T1");
        assert!(proposal.is_open());
        assert!(proposal.result.is_zero());
    }

    #[tokio::test]
    async fn test_open_topic_rejected_then_expired_after_settlement() {
        let (service, _clock) = service();
        service
            .cache_proposal("T1", 60, vec!["A".to_string()])
            .await
            .unwrap();

        let open = service.validate_new_proposal("T1").await.unwrap_err();
        assert_eq!(open.status_code(), status::PROPOSAL_ALREADY_OPEN);

        service.settle("T1", 0, tally(&[])).await.unwrap();

        let settled = service.validate_new_proposal("T1").await.unwrap_err();
        assert_eq!(settled.status_code(), status::PROPOSAL_EXPIRED);
    }

    #[tokio::test]
    async fn test_settlement_writes_result_once_signalled() {
        let (service, clock) = service();
        service
            .cache_proposal("T1", 60, vec!["A".to_string(), "B".to_string()])
            .await
            .unwrap();

        clock.set(5_000);
        let settled = service
            .settle("T1", 1, tally(&[("A", 1), ("B", 0)]))
            .await
            .unwrap();

        assert!(settled.expired);
        assert_eq!(settled.settled_at, Some(5_000));
        assert_eq!(settled.result.count, 1);
        assert_eq!(settled.result.options.get("A"), Some(&1));

        // Expired flag is monotonic: re-reading never reports open again.
        let detail = service.proposal_detail("T1").await.unwrap();
        assert!(detail.expired);
    }

    #[tokio::test]
    async fn test_settle_unknown_topic_fails() {
        let (service, _clock) = service();

        let err = service.settle("T9", 1, tally(&[("A", 1)])).await.unwrap_err();
        assert!(matches!(err, SettlementError::ProposalNotFound(_)));
        assert_eq!(err.status_code(), status::STORE_ACCESS_ERROR);
    }

    #[tokio::test]
    async fn test_confirmations_recorded_even_after_settlement() {
        let (service, _clock) = service();
        service
            .cache_proposal("T1", 60, vec!["A".to_string()])
            .await
            .unwrap();

        service.record_confirmation("T1", 10, 10).await.unwrap();
        service.settle("T1", 0, tally(&[])).await.unwrap();
        let updated = service.record_confirmation("T1", 11, 12).await.unwrap();

        assert_eq!(updated.unwrap().confirmations.len(), 2);

        // Missing topic is a logged no-op, not an error.
        assert!(service.record_confirmation("T9", 1, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let (service, _clock) = service();
        let err = service.proposal_detail("T1").await.unwrap_err();
        assert_eq!(err.status_code(), status::PROPOSAL_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_returns_requested_page() {
        let (service, clock) = service();
        for (i, topic) in ["T1", "T2", "T3"].iter().enumerate() {
            clock.set(1_000 + i as u64);
            service
                .cache_proposal(topic, 10, vec!["A".to_string()])
                .await
                .unwrap();
        }

        let page = service
            .proposal_list(
                ProposalFilter::default(),
                Some(SortSpec {
                    field: SortField::CreatedAt,
                    direction: SortDirection::Asc,
                }),
                Paging { skip: 0, limit: 2 },
            )
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].topic, "T1");
        assert_eq!(page[1].topic, "T2");
    }

    #[tokio::test]
    async fn test_list_paging_rejections() {
        let (service, _clock) = service();
        service
            .cache_proposal("T1", 10, vec!["A".to_string()])
            .await
            .unwrap();

        let limit = service
            .proposal_list(ProposalFilter::default(), None, Paging { skip: 0, limit: 0 })
            .await
            .unwrap_err();
        assert_eq!(limit.status_code(), status::LIMIT_ZERO_PARAM);

        let skip = service
            .proposal_list(ProposalFilter::default(), None, Paging { skip: -1, limit: 5 })
            .await
            .unwrap_err();
        assert_eq!(skip.status_code(), status::SKIP_ZERO_PARAM);

        let bounds = service
            .proposal_list(ProposalFilter::default(), None, Paging { skip: 1, limit: 5 })
            .await
            .unwrap_err();
        assert_eq!(bounds.status_code(), status::PAGING_OUT_OF_BOUNDS);
    }

    #[tokio::test]
    async fn test_list_with_empty_match_set_is_in_bounds() {
        let (service, _clock) = service();

        let page = service
            .proposal_list(
                ProposalFilter { expired: Some(true) },
                None,
                Paging { skip: 0, limit: 5 },
            )
            .await
            .unwrap();
        assert!(page.is_empty());
    }
}
