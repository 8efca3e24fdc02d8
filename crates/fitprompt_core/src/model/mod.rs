//! Domain model for the coaching prompt flow.
//!
//! # Responsibility
//! - Define the canonical profile and reply records used by core logic.
//! - Keep validation next to the data it protects.
//!
//! # Invariants
//! - Only validated profiles reach persistence or prompt rendering.

pub mod profile;
pub mod reply;
