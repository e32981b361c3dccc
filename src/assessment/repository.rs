use super::domain::{Attempt, AttemptId};

/// Storage abstraction so services can be exercised in isolation.
pub trait AttemptRepository: Send + Sync {
    fn insert(&self, attempt: Attempt) -> Result<Attempt, RepositoryError>;
    fn update(&self, attempt: Attempt) -> Result<(), RepositoryError>;
    fn find_by_id(&self, id: &AttemptId) -> Result<Option<Attempt>, RepositoryError>;
    fn find_latest_submitted(
        &self,
        profile_key: &str,
        test_id: &str,
    ) -> Result<Option<Attempt>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists or was modified concurrently")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
