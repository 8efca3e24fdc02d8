//! Core domain logic for FitPrompt, the fitness-coaching prompt generator.
//! This crate is the single source of truth for preference and profile
//! invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod repo;
pub mod security;
pub mod service;
pub mod store;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::profile::{ExperienceLevel, FitnessGoal, FitnessProfile, ProfileValidationError};
pub use model::reply::CoachReply;
pub use prompt::build_coaching_prompt;
pub use repo::profile_repo::{KvProfileRepository, ProfileRepository, RepoError, RepoResult};
pub use security::{header_value, security_headers};
pub use service::coach_service::{CoachError, CoachResult, CoachService};
pub use service::theme_service::{
    Listener, ListenerId, Subscription, ThemeError, ThemeResult, ThemeService, DARK_MODE_KEY,
    DEFAULT_DARK_MODE,
};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
