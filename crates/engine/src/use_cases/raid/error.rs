//! Raid reconciliation errors.

use crate::infrastructure::ports::RepoError;
use raidledger_domain::SessionId;

/// Errors that stop a raid outcome from being applied.
#[derive(Debug, thiserror::Error)]
pub enum RaidError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(SessionId),
    #[error("Profile {0} has no scav character")]
    ScavProfileMissing(SessionId),
    #[error("Bot template not found: {0}")]
    BotTemplateMissing(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl RaidError {
    /// Maps a store lookup failure, keeping not-found distinct from storage faults.
    pub fn from_lookup(session_id: &SessionId, error: RepoError) -> Self {
        if error.is_not_found() {
            Self::ProfileNotFound(session_id.clone())
        } else {
            Self::Repo(error)
        }
    }
}
