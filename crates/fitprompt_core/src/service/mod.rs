//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and repository calls into use-case level APIs.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod coach_service;
pub mod theme_service;
