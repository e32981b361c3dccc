use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::repository::RepositoryError;

use super::domain::JourneyState;

/// Storage abstraction for journey state.
pub trait JourneyRepository: Send + Sync {
    fn load(&self, profile_key: &str, test_id: &str)
        -> Result<Option<JourneyState>, RepositoryError>;

    /// Persist `state`. Implementations must reject the write with
    /// [`RepositoryError::Conflict`] when the stored version differs from
    /// `expected_version`, so two merges for the same journey cannot silently
    /// overwrite each other.
    fn save(&self, state: JourneyState, expected_version: u64) -> Result<(), RepositoryError>;
}

/// Outbound hook fired when a journey completes (e.g. a CRM or mail adapter).
pub trait CompletionNotifier: Send + Sync {
    fn notify(&self, notice: CompletionNotice) -> Result<(), NotifyError>;
}

/// Payload handed to the completion hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionNotice {
    pub profile_key: String,
    pub test_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
