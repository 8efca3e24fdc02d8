//! Prompt rendering for the external AI chat service.
//!
//! # Responsibility
//! - Turn validated domain records into copy-paste ready prompt text.
//! - Keep wording in one place so prompts stay stable across callers.

pub mod coaching;

pub use coaching::build_coaching_prompt;
