//! # Shared Types Crate
//!
//! This crate contains the governance domain entities shared across the
//! workspace: proposals, tallies, block confirmations, users and ballots.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate entity types are defined here.
//! - **Store Agnostic**: Entities carry no persistence concerns; they are
//!   plain serde-serializable values.

pub mod entities;

pub use entities::*;
