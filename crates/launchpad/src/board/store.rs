use super::domain::{Application, ApplicationId};
use super::view::{self, ArchivedView, BoardView};

/// Owned, in-memory collection of one user's applications.
///
/// The store is an explicit value handed to the sync layer rather than a
/// module-level singleton; insertion order is preserved so the board renders
/// stably across refreshes.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    applications: Vec<Application>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_applications(applications: Vec<Application>) -> Self {
        Self { applications }
    }

    pub fn replace_all(&mut self, applications: Vec<Application>) {
        self.applications = applications;
    }

    /// Insert or overwrite by id, keeping the original position on overwrite.
    pub fn insert(&mut self, application: Application) {
        match self.get_mut(&application.id) {
            Some(slot) => *slot = application,
            None => self.applications.push(application),
        }
    }

    pub fn get(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|record| &record.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &ApplicationId) -> Option<&mut Application> {
        self.applications.iter_mut().find(|record| &record.id == id)
    }

    /// Drop every card for `job_id`, returning the removed records so a failed
    /// delete can put them back.
    pub fn remove_for_job(&mut self, job_id: &str) -> Vec<Application> {
        let (removed, kept) = std::mem::take(&mut self.applications)
            .into_iter()
            .partition(|record| record.job_id == job_id);
        self.applications = kept;
        removed
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn board(&self) -> BoardView {
        view::board_view(&self.applications)
    }

    pub fn archived(&self) -> ArchivedView {
        view::archived_view(&self.applications)
    }

    /// Clone of a record taken before an optimistic mutation.
    pub fn snapshot(&self, id: &ApplicationId) -> Option<Application> {
        self.get(id).cloned()
    }

    /// Put a snapshot back after a failed write.
    pub fn restore(&mut self, snapshot: Application) {
        self.insert(snapshot);
    }
}
