//! # Agora Test Suite
//!
//! Unified integration tests exercising the lifecycle engine through the
//! shared bus, end to end.

pub mod integration;
