//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate key names and JSON encoding from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `FitnessProfile::validate()` before
//!   persistence.
//! - Repository APIs report undecodable documents as `InvalidData`, separate
//!   from store transport errors.

pub mod profile_repo;
