//! Web-client request dispatcher.
//!
//! Decodes the JSON parameters of an inbound request into its typed
//! form, invokes the matching service port and converts the outcome
//! into a structured response body. Every path produces a response;
//! undecodable parameters or an unknown method answer with
//! `UNKNOWN_ERROR` instead of faulting.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::domain::{Paging, ProposalFilter, SortDirection, SortField, SortSpec};
use crate::error::{status, QueryError};
use crate::events::requests::{
    CacheBallotRequest, CacheProposalRequest, GetProposalRequest, GetUserBallotsRequest,
    ListProposalsRequest, SortParams, ValidateBallotRequest, ValidateProposalRequest,
    METHOD_CACHE_BALLOT, METHOD_CACHE_PROPOSAL, METHOD_GET_PROPOSAL, METHOD_GET_USER_BALLOTS,
    METHOD_LIST_PROPOSALS, METHOD_VALIDATE_BALLOT, METHOD_VALIDATE_PROPOSAL,
};
use crate::events::responses::{
    CachedResponse, ProposalDetailResponse, ProposalListResponse, UserBallotsResponse,
    ValidationResponse,
};
use crate::ports::inbound::{
    BallotAdmission, BallotQueries, LifecycleApi, ProposalAdmission, ProposalQueries,
};

/// Dispatcher from wire methods to service ports.
///
/// Stateless after construction; holds only shared handles to the
/// services.
pub struct ClientRequestHandler {
    proposal_admission: Arc<dyn ProposalAdmission>,
    ballot_admission: Arc<dyn BallotAdmission>,
    lifecycle: Arc<dyn LifecycleApi>,
    proposal_queries: Arc<dyn ProposalQueries>,
    ballot_queries: Arc<dyn BallotQueries>,
}

/// Serialize a response struct into a JSON body.
fn to_body<T: Serialize>(response: &T) -> Value {
    serde_json::to_value(response).unwrap_or_else(|e| {
        error!(error = %e, "Failed to serialize response body");
        json!({ "status": status::UNKNOWN_ERROR })
    })
}

/// Decode typed parameters, or `None` when the payload does not match.
fn decode<T: DeserializeOwned>(method: &str, params: Value) -> Option<T> {
    match serde_json::from_value(params) {
        Ok(request) => Some(request),
        Err(e) => {
            warn!(method = %method, error = %e, "Undecodable request parameters");
            None
        }
    }
}

impl ClientRequestHandler {
    /// Create a handler over the five service ports.
    pub fn new(
        proposal_admission: Arc<dyn ProposalAdmission>,
        ballot_admission: Arc<dyn BallotAdmission>,
        lifecycle: Arc<dyn LifecycleApi>,
        proposal_queries: Arc<dyn ProposalQueries>,
        ballot_queries: Arc<dyn BallotQueries>,
    ) -> Self {
        Self {
            proposal_admission,
            ballot_admission,
            lifecycle,
            proposal_queries,
            ballot_queries,
        }
    }

    /// Dispatch one web-client request to its handler.
    ///
    /// Always returns a response body.
    pub async fn dispatch(&self, method: &str, params: Value) -> Value {
        debug!(method = %method, "Dispatching client request");

        match method {
            METHOD_VALIDATE_PROPOSAL => match decode(method, params) {
                Some(request) => to_body(&self.handle_validate_proposal(request).await),
                None => to_body(&ValidationResponse::rejected(status::UNKNOWN_ERROR)),
            },
            METHOD_CACHE_PROPOSAL => match decode(method, params) {
                Some(request) => to_body(&self.handle_cache_proposal(request).await),
                None => to_body(&CachedResponse::failed(status::UNKNOWN_ERROR)),
            },
            METHOD_VALIDATE_BALLOT => match decode(method, params) {
                Some(request) => to_body(&self.handle_validate_ballot(request).await),
                None => to_body(&ValidationResponse::rejected(status::UNKNOWN_ERROR)),
            },
            METHOD_CACHE_BALLOT => match decode(method, params) {
                Some(request) => to_body(&self.handle_cache_ballot(request).await),
                None => to_body(&CachedResponse::failed(status::UNKNOWN_ERROR)),
            },
            METHOD_GET_PROPOSAL => match decode(method, params) {
                Some(request) => to_body(&self.handle_get_proposal(request).await),
                None => to_body(&ProposalDetailResponse::failed(status::UNKNOWN_ERROR)),
            },
            METHOD_LIST_PROPOSALS => match decode(method, params) {
                Some(request) => to_body(&self.handle_list_proposals(request).await),
                None => to_body(&ProposalListResponse::failed(status::UNKNOWN_ERROR)),
            },
            METHOD_GET_USER_BALLOTS => match decode(method, params) {
                Some(request) => to_body(&self.handle_get_user_ballots(request).await),
                None => to_body(&UserBallotsResponse::failed(status::UNKNOWN_ERROR)),
            },
            _ => {
                warn!(method = %method, "Unknown request method");
                json!({ "status": status::UNKNOWN_ERROR })
            }
        }
    }

    /// Record a block confirmation reported by the chain observer.
    pub async fn handle_block_created(
        &self,
        topic: &str,
        height: u64,
        length: u64,
    ) -> CachedResponse {
        match self.lifecycle.record_confirmation(topic, height, length).await {
            Ok(_) => CachedResponse::ok(),
            Err(e) => CachedResponse::failed(e.status_code()),
        }
    }

    /// Settle a proposal from an expiration report.
    pub async fn handle_pending_expired(
        &self,
        topic: &str,
        count: u64,
        options: std::collections::BTreeMap<String, u64>,
    ) -> CachedResponse {
        match self.lifecycle.settle(topic, count, options).await {
            Ok(_) => CachedResponse::ok(),
            Err(e) => CachedResponse::failed(e.status_code()),
        }
    }

    async fn handle_validate_proposal(
        &self,
        request: ValidateProposalRequest,
    ) -> ValidationResponse {
        match self
            .proposal_admission
            .validate_new_proposal(&request.topic)
            .await
        {
            Ok(()) => ValidationResponse::ok(),
            Err(e) => ValidationResponse::rejected(e.status_code()),
        }
    }

    async fn handle_cache_proposal(&self, request: CacheProposalRequest) -> CachedResponse {
        match self
            .proposal_admission
            .cache_proposal(&request.topic, request.duration, request.options)
            .await
        {
            Ok(_) => CachedResponse::ok(),
            Err(e) => CachedResponse::failed(e.status_code()),
        }
    }

    async fn handle_validate_ballot(&self, request: ValidateBallotRequest) -> ValidationResponse {
        match self
            .ballot_admission
            .validate_new_ballot(&request.user_hash, &request.topic, &request.option)
            .await
        {
            Ok(()) => ValidationResponse::ok(),
            Err(e) => ValidationResponse::rejected(e.status_code()),
        }
    }

    async fn handle_cache_ballot(&self, request: CacheBallotRequest) -> CachedResponse {
        match self
            .ballot_admission
            .cache_ballot(&request.user_hash, &request.vote_hash, &request.topic)
            .await
        {
            Ok(_) => CachedResponse::ok(),
            Err(e) => CachedResponse::failed(e.status_code()),
        }
    }

    async fn handle_get_proposal(&self, request: GetProposalRequest) -> ProposalDetailResponse {
        match self.proposal_queries.proposal_detail(&request.topic).await {
            Ok(proposal) => ProposalDetailResponse::ok(&proposal),
            Err(e) => ProposalDetailResponse::failed(e.status_code()),
        }
    }

    async fn handle_list_proposals(&self, request: ListProposalsRequest) -> ProposalListResponse {
        let filter = ProposalFilter {
            expired: request.filter.and_then(|f| f.expired),
        };

        // Sort parameters are boundary-validated here, before any store
        // round trip.
        let sort = match request.sort.map(|s| parse_sort(&s)).transpose() {
            Ok(sort) => sort,
            Err(e) => return ProposalListResponse::failed(e.status_code()),
        };

        let paging = Paging {
            skip: request.paging.skip,
            limit: request.paging.limit,
        };

        match self.proposal_queries.proposal_list(filter, sort, paging).await {
            Ok(proposals) => ProposalListResponse::ok(&proposals),
            Err(e) => ProposalListResponse::failed(e.status_code()),
        }
    }

    async fn handle_get_user_ballots(
        &self,
        request: GetUserBallotsRequest,
    ) -> UserBallotsResponse {
        match self.ballot_queries.user_ballots(&request.user_hash).await {
            Ok(ballots) => UserBallotsResponse::ok(&ballots),
            Err(e) => UserBallotsResponse::failed(e.status_code()),
        }
    }
}

/// Validate wire sort parameters into a typed specification.
fn parse_sort(params: &SortParams) -> Result<SortSpec, QueryError> {
    // Direction first: a bad order is reported even alongside a bad field.
    let direction = SortDirection::from_param(&params.order)?;
    let field = SortField::from_param(&params.sort_by)?;
    Ok(SortSpec { field, direction })
}
