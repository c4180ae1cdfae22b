//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for the transport layer
//! - Driven Ports (outbound) - Dependencies on the entity store

pub mod inbound;
pub mod outbound;

pub use inbound::{
    BallotAdmission, BallotQueries, LifecycleApi, ProposalAdmission, ProposalQueries,
};
pub use outbound::{ProposalStore, TimeSource, UserStore};
