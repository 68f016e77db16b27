use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::board::domain::{Application, ApplicationId, ApplicationStatus};
use crate::board::mapper;

use super::repository::{ApplicationRepository, JobDirectory, RepositoryError};
use super::views::ApplicationView;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Patch semantics for `PUT /api/applications`: absent fields stay untouched,
/// an explicit null clears the stored sub-stage.
#[derive(Debug, Clone, Default)]
pub struct ApplicationChange {
    pub status: Option<ApplicationStatus>,
    pub sub_stage: Option<Option<String>>,
    pub archived: Option<bool>,
}

/// Creation payload after deserialization.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: String,
    pub job_id: String,
    pub status: ApplicationStatus,
    pub resume_id: Option<String>,
    pub position: Option<String>,
}

/// Service composing the repository and the job directory.
pub struct ApplicationService<R, J> {
    repository: Arc<R>,
    jobs: Arc<J>,
}

impl<R, J> ApplicationService<R, J>
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
{
    pub fn new(repository: Arc<R>, jobs: Arc<J>) -> Self {
        Self { repository, jobs }
    }

    /// Listing for one user, each record carrying its nested job summary.
    pub fn list(&self, user_id: &str) -> Result<Vec<ApplicationView>, ApplicationServiceError> {
        let records = self.repository.list_for_user(user_id)?;
        Ok(records.iter().map(|record| self.view_of(record)).collect())
    }

    pub fn view_of(&self, record: &Application) -> ApplicationView {
        ApplicationView::from_application(record, self.jobs.job_summary(&record.job_id))
    }

    /// Create a tracked application. One record per `(user, job)`; a second
    /// attempt is the "already applied" business rule.
    pub fn create(
        &self,
        new_application: NewApplication,
    ) -> Result<Application, ApplicationServiceError> {
        if new_application.user_id.trim().is_empty() {
            return Err(ApplicationServiceError::Validation("user_id is required"));
        }
        if new_application.job_id.trim().is_empty() {
            return Err(ApplicationServiceError::Validation("job_id is required"));
        }

        let existing = self.repository.list_for_user(&new_application.user_id)?;
        if existing
            .iter()
            .any(|record| record.job_id == new_application.job_id)
        {
            return Err(ApplicationServiceError::AlreadyApplied {
                job_id: new_application.job_id,
            });
        }

        let now = Utc::now();
        let record = Application {
            id: next_application_id(),
            job_id: new_application.job_id,
            user_id: new_application.user_id,
            status: new_application.status,
            sub_stage: None,
            applied_at: now,
            status_updated_at: now,
            notes: String::new(),
            archived: false,
            resume_id: new_application.resume_id,
            position: new_application.position,
            tags: Vec::new(),
        };

        Ok(self.repository.insert(record)?)
    }

    /// Apply a wire patch to a stored record.
    ///
    /// Setting a status whose column has no sub-stage groups clears the
    /// stored sub-stage even when the patch does not mention it, so a card
    /// never strands a stale group key on a group-less column.
    pub fn apply_change(
        &self,
        id: &ApplicationId,
        change: ApplicationChange,
    ) -> Result<Application, ApplicationServiceError> {
        let mut record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let sub_stage_given = change.sub_stage.is_some();
        if let Some(sub_stage) = change.sub_stage {
            record.sub_stage = sub_stage;
        }
        if let Some(status) = change.status {
            if status != record.status {
                record.status_updated_at = Utc::now();
            }
            record.status = status;

            let column = mapper::column_for(status, None);
            if !sub_stage_given && mapper::sub_stage_groups(column).is_empty() {
                record.sub_stage = None;
            }
        }
        if let Some(archived) = change.archived {
            record.archived = archived;
        }

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Replace the notes on a record the caller owns.
    pub fn update_notes(
        &self,
        id: &ApplicationId,
        user_id: &str,
        notes: &str,
    ) -> Result<(), ApplicationServiceError> {
        let mut record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        // Foreign records are indistinguishable from missing ones.
        if record.user_id != user_id {
            return Err(RepositoryError::NotFound.into());
        }

        record.notes = notes.to_string();
        self.repository.update(record)?;
        Ok(())
    }

    pub fn delete_for_job(
        &self,
        job_id: &str,
        user_id: &str,
    ) -> Result<usize, ApplicationServiceError> {
        Ok(self.repository.delete_for_job(job_id, user_id)?)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("already applied to job {job_id}")]
    AlreadyApplied { job_id: String },
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
