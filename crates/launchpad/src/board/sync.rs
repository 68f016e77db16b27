//! Optimistic synchronization between the board store and the REST surface.
//!
//! Every user action follows one strategy: mutate the store first, issue
//! exactly one gateway write, and on failure restore the pre-move snapshot
//! and record a notification. There is no refetch-on-error path, no retry,
//! and no batching; a user who wants to try again moves the card again.

use std::sync::Arc;

use chrono::Utc;

use super::domain::{Application, ApplicationId, BoardColumn};
use super::gateway::{ApplicationDraft, ApplicationGateway, ApplicationUpdate, GatewayError};
use super::mapper;
use super::store::BoardStore;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Non-blocking notification sink (the toast analog).
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Drag-library-independent description of a card move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMove {
    pub application_id: ApplicationId,
    pub to: BoardColumn,
    /// Destination sub-stage group key, when the user dropped on a specific
    /// group. `None` lands on the column default.
    pub group: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("unknown application {0}")]
    UnknownApplication(ApplicationId),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Applies board mutations optimistically and persists each through exactly
/// one gateway write.
pub struct BoardSync<G, N> {
    store: BoardStore,
    gateway: Arc<G>,
    notifier: Arc<N>,
}

impl<G, N> BoardSync<G, N>
where
    G: ApplicationGateway,
    N: Notifier,
{
    pub fn new(store: BoardStore, gateway: Arc<G>, notifier: Arc<N>) -> Self {
        Self {
            store,
            gateway,
            notifier,
        }
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn into_store(self) -> BoardStore {
        self.store
    }

    /// Replace local state from the backend listing. Not optimistic: there is
    /// nothing to revert on a failed read.
    pub async fn refresh(&mut self, user_id: &str) -> Result<(), SyncError> {
        let gateway = Arc::clone(&self.gateway);
        match gateway.fetch(user_id).await {
            Ok(applications) => {
                self.store.replace_all(applications);
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .notify(Severity::Error, &format!("could not load board: {err}"));
                Err(err.into())
            }
        }
    }

    /// Move a card between columns/groups: optimistic apply, one write, and
    /// on failure the pre-move record is restored.
    pub async fn move_card(&mut self, card_move: CardMove) -> Result<(), SyncError> {
        let CardMove {
            application_id,
            to,
            group,
        } = card_move;

        let snapshot = self
            .store
            .snapshot(&application_id)
            .ok_or_else(|| SyncError::UnknownApplication(application_id.clone()))?;
        let patch = mapper::patch_for_move(to, group.as_deref());

        if let Some(record) = self.store.get_mut(&application_id) {
            if let Some(status) = patch.status {
                if status != record.status {
                    record.status_updated_at = Utc::now();
                }
                record.status = status;
            }
            record.sub_stage = patch.sub_stage.clone();
        }

        let update = ApplicationUpdate {
            status: patch.status,
            sub_stage: Some(patch.sub_stage),
            archived: None,
        };
        self.persist(snapshot, &update, "could not move application")
            .await
    }

    /// Archive or restore a card. Only the flag flips, so restoring returns
    /// the card to exactly its prior column.
    pub async fn set_archived(
        &mut self,
        id: &ApplicationId,
        archived: bool,
    ) -> Result<(), SyncError> {
        let snapshot = self
            .store
            .snapshot(id)
            .ok_or_else(|| SyncError::UnknownApplication(id.clone()))?;

        if let Some(record) = self.store.get_mut(id) {
            record.archived = archived;
        }

        let update = ApplicationUpdate {
            archived: Some(archived),
            ..ApplicationUpdate::default()
        };
        let context = if archived {
            "could not archive application"
        } else {
            "could not restore application"
        };
        self.persist(snapshot, &update, context).await
    }

    /// Edit the free-form notes on a card.
    pub async fn edit_notes(
        &mut self,
        id: &ApplicationId,
        user_id: &str,
        notes: &str,
    ) -> Result<(), SyncError> {
        let snapshot = self
            .store
            .snapshot(id)
            .ok_or_else(|| SyncError::UnknownApplication(id.clone()))?;

        if let Some(record) = self.store.get_mut(id) {
            record.notes = notes.to_string();
        }

        let gateway = Arc::clone(&self.gateway);
        if let Err(err) = gateway.update_notes(id, user_id, notes).await {
            self.store.restore(snapshot);
            self.notifier
                .notify(Severity::Error, &format!("could not save notes: {err}"));
            return Err(err.into());
        }
        Ok(())
    }

    /// Track a job on the board. The server assigns the id, so the card
    /// appears only after the write succeeds; duplicates surface as a
    /// rejection notification.
    pub async fn add_card(&mut self, draft: ApplicationDraft) -> Result<ApplicationId, SyncError> {
        let gateway = Arc::clone(&self.gateway);
        match gateway.create(&draft).await {
            Ok(application) => {
                let id = application.id.clone();
                self.store.insert(application);
                Ok(id)
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Error,
                    &format!("could not save application: {err}"),
                );
                Err(err.into())
            }
        }
    }

    /// Dismiss a job entirely: drop its local cards and issue the delete. A
    /// failed delete puts the cards back.
    pub async fn remove_job(&mut self, job_id: &str, user_id: &str) -> Result<(), SyncError> {
        let removed = self.store.remove_for_job(job_id);

        let gateway = Arc::clone(&self.gateway);
        if let Err(err) = gateway.delete_for_job(job_id, user_id).await {
            for application in removed {
                self.store.insert(application);
            }
            self.notifier
                .notify(Severity::Error, &format!("could not remove job: {err}"));
            return Err(err.into());
        }
        Ok(())
    }

    async fn persist(
        &mut self,
        snapshot: Application,
        update: &ApplicationUpdate,
        context: &str,
    ) -> Result<(), SyncError> {
        let id = snapshot.id.clone();
        let gateway = Arc::clone(&self.gateway);
        if let Err(err) = gateway.update(&id, update).await {
            self.store.restore(snapshot);
            self.notifier
                .notify(Severity::Error, &format!("{context}: {err}"));
            return Err(err.into());
        }
        Ok(())
    }
}
