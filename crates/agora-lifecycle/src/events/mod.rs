//! Events Layer - Wire Message Types
//!
//! Typed requests decoded from `ClientRequest` bus events and typed
//! responses serialized back into `ClientResponse` bodies.

pub mod requests;
pub mod responses;

pub use requests::{
    CacheBallotRequest, CacheProposalRequest, FilterParams, GetProposalRequest,
    GetUserBallotsRequest, ListProposalsRequest, PagingParams, SortParams,
    ValidateBallotRequest, ValidateProposalRequest,
};
pub use responses::{
    BallotView, CachedResponse, ConfirmationView, ProposalDetailResponse, ProposalListResponse,
    ProposalView, TallyView, UserBallotsResponse, ValidationResponse,
};
