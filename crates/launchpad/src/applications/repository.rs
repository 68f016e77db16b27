use crate::board::domain::{Application, ApplicationId};

use super::views::JobSummaryView;

/// Storage abstraction so the service can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: Application) -> Result<Application, RepositoryError>;
    fn update(&self, record: Application) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Application>, RepositoryError>;
    /// Remove every record for `(job_id, user_id)`, returning how many went.
    fn delete_for_job(&self, job_id: &str, user_id: &str) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Lookup seam for the nested job summary on listing responses.
pub trait JobDirectory: Send + Sync {
    fn job_summary(&self, job_id: &str) -> Option<JobSummaryView>;
}
