//! Coaching flow use-case service.
//!
//! # Responsibility
//! - Save the profile, render it into a prompt, and keep the pasted-back
//!   reply.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - A prompt is only generated from a stored, valid profile.
//! - Blank replies are rejected before reaching the repository.

use crate::model::profile::FitnessProfile;
use crate::model::reply::CoachReply;
use crate::prompt::build_coaching_prompt;
use crate::repo::profile_repo::{ProfileRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type CoachResult<T> = Result<T, CoachError>;

#[derive(Debug)]
pub enum CoachError {
    Repo(RepoError),
    MissingProfile,
    EmptyReply,
}

impl Display for CoachError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::MissingProfile => write!(f, "no fitness profile saved yet"),
            Self::EmptyReply => write!(f, "coach reply cannot be empty"),
        }
    }
}

impl Error for CoachError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::MissingProfile | Self::EmptyReply => None,
        }
    }
}

impl From<RepoError> for CoachError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service for the profile → prompt → reply loop.
pub struct CoachService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> CoachService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Normalizes and stores `profile`, returning the stored copy.
    pub fn save_profile(&self, profile: &FitnessProfile) -> CoachResult<FitnessProfile> {
        let normalized = profile.normalized();
        if let Err(err) = self.repo.save_profile(&normalized) {
            warn!(
                "event=profile_save module=coach status=error error={}",
                err
            );
            return Err(err.into());
        }
        info!(
            "event=profile_save module=coach status=ok equipment_count={}",
            normalized.equipment.len()
        );
        Ok(normalized)
    }

    pub fn profile(&self) -> CoachResult<Option<FitnessProfile>> {
        Ok(self.repo.load_profile()?)
    }

    /// Renders the prompt for the stored profile.
    ///
    /// # Errors
    /// - `MissingProfile` when nothing is stored.
    pub fn generate_prompt(&self) -> CoachResult<String> {
        let profile = self.repo.load_profile()?.ok_or(CoachError::MissingProfile)?;
        let prompt = build_coaching_prompt(&profile);
        info!(
            "event=prompt_generate module=coach status=ok prompt_chars={}",
            prompt.chars().count()
        );
        Ok(prompt)
    }

    /// Records the pasted-back reply stamped with the current time.
    pub fn record_reply(&self, body: &str) -> CoachResult<CoachReply> {
        self.record_reply_at(body, now_epoch_ms())
    }

    /// Records the pasted-back reply with an explicit timestamp.
    pub fn record_reply_at(&self, body: &str, recorded_at_ms: i64) -> CoachResult<CoachReply> {
        let reply = CoachReply::new(body, recorded_at_ms).ok_or(CoachError::EmptyReply)?;
        self.repo.save_reply(&reply)?;
        info!(
            "event=reply_record module=coach status=ok reply_chars={}",
            reply.body.chars().count()
        );
        Ok(reply)
    }

    pub fn latest_reply(&self) -> CoachResult<Option<CoachReply>> {
        Ok(self.repo.load_reply()?)
    }

    /// Clears both the stored profile and the latest reply.
    pub fn reset(&self) -> CoachResult<()> {
        self.repo.clear_profile()?;
        self.repo.clear_reply()?;
        info!("event=coach_reset module=coach status=ok");
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
