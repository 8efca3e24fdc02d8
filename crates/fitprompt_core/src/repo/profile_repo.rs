//! Profile and coach-reply repository over the key-value store.
//!
//! # Responsibility
//! - Persist the fitness profile and latest coach reply as JSON documents.
//! - Keep key names and encoding inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `FitnessProfile::validate()` before touching the store.
//! - Read paths reject undecodable or invalid documents instead of masking
//!   them.

use crate::model::profile::{FitnessProfile, ProfileValidationError};
use crate::model::reply::CoachReply;
use crate::store::{KeyValueStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store key of the serialized profile.
pub const PROFILE_KEY: &str = "fitnessProfile";
/// Store key of the serialized latest reply.
pub const REPLY_KEY: &str = "coachReply";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for profile/reply persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProfileValidationError),
    Store(StoreError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ProfileValidationError> for RepoError {
    fn from(value: ProfileValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for the coaching flow documents.
pub trait ProfileRepository {
    fn load_profile(&self) -> RepoResult<Option<FitnessProfile>>;
    fn save_profile(&self, profile: &FitnessProfile) -> RepoResult<()>;
    fn clear_profile(&self) -> RepoResult<()>;
    fn load_reply(&self) -> RepoResult<Option<CoachReply>>;
    fn save_reply(&self, reply: &CoachReply) -> RepoResult<()>;
    fn clear_reply(&self) -> RepoResult<()>;
}

/// JSON-over-key-value repository.
pub struct KvProfileRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvProfileRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| RepoError::InvalidData(format!("key `{key}`: {err}")))
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> RepoResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|err| RepoError::InvalidData(format!("key `{key}`: {err}")))?;
        self.store.set(key, &raw)?;
        Ok(())
    }
}

impl<S: KeyValueStore> ProfileRepository for KvProfileRepository<S> {
    fn load_profile(&self) -> RepoResult<Option<FitnessProfile>> {
        self.read_json(PROFILE_KEY)
    }

    fn save_profile(&self, profile: &FitnessProfile) -> RepoResult<()> {
        profile.validate()?;
        self.write_json(PROFILE_KEY, profile)
    }

    fn clear_profile(&self) -> RepoResult<()> {
        self.store.remove(PROFILE_KEY)?;
        Ok(())
    }

    fn load_reply(&self) -> RepoResult<Option<CoachReply>> {
        self.read_json(REPLY_KEY)
    }

    fn save_reply(&self, reply: &CoachReply) -> RepoResult<()> {
        self.write_json(REPLY_KEY, reply)
    }

    fn clear_reply(&self) -> RepoResult<()> {
        self.store.remove(REPLY_KEY)?;
        Ok(())
    }
}
