//! Service Layer
//!
//! Contains the application services that orchestrate domain logic
//! and coordinate with the entity store via ports.

pub mod ballot_service;
pub mod proposal_service;

pub use ballot_service::BallotService;
pub use proposal_service::ProposalService;
