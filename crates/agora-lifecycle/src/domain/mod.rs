//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Admission predicates for the proposal and ballot pipelines
//! - The proposal lifecycle state machine
//! - Query parameter validation and ordering

pub mod admission;
pub mod lifecycle;
pub mod query;

pub use lifecycle::ProposalPhase;
pub use query::{Paging, ProposalFilter, SortDirection, SortField, SortSpec};
