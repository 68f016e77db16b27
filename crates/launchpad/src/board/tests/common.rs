use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::board::domain::{Application, ApplicationId, ApplicationStatus};
use crate::board::gateway::{
    ApplicationDraft, ApplicationGateway, ApplicationUpdate, GatewayError,
};
use crate::board::store::BoardStore;
use crate::board::sync::{BoardSync, Notifier, Severity};

pub(super) fn application(id: &str, status: ApplicationStatus) -> Application {
    let applied_at = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).single().expect("valid ts");
    Application {
        id: ApplicationId(id.to_string()),
        job_id: format!("job-for-{id}"),
        user_id: "user-1".to_string(),
        status,
        sub_stage: None,
        applied_at,
        status_updated_at: applied_at,
        notes: String::new(),
        archived: false,
        resume_id: None,
        position: None,
        tags: Vec::new(),
    }
}

/// Gateway double that records every write and can be told to refuse the next
/// one, standing in for a network or backend failure.
#[derive(Default)]
pub(super) struct MockGateway {
    pub(super) fail_next: AtomicBool,
    pub(super) updates: Mutex<Vec<(ApplicationId, ApplicationUpdate)>>,
    pub(super) deletes: Mutex<Vec<(String, String)>>,
    pub(super) listing: Mutex<Vec<Application>>,
}

impl MockGateway {
    pub(super) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn take_failure(&self) -> Result<(), GatewayError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            Err(GatewayError::Network("connection reset".to_string()))
        } else {
            Ok(())
        }
    }

    pub(super) fn update_count(&self) -> usize {
        self.updates.lock().expect("updates mutex poisoned").len()
    }
}

impl ApplicationGateway for MockGateway {
    async fn fetch(&self, _user_id: &str) -> Result<Vec<Application>, GatewayError> {
        self.take_failure()?;
        Ok(self.listing.lock().expect("listing mutex poisoned").clone())
    }

    async fn update(
        &self,
        id: &ApplicationId,
        update: &ApplicationUpdate,
    ) -> Result<(), GatewayError> {
        // Record the attempt first: a failed write still counts as a write.
        self.updates
            .lock()
            .expect("updates mutex poisoned")
            .push((id.clone(), update.clone()));
        self.take_failure()
    }

    async fn create(&self, draft: &ApplicationDraft) -> Result<Application, GatewayError> {
        self.take_failure()?;
        let mut created = application("app-created", draft.status);
        created.job_id = draft.job_id.clone();
        created.user_id = draft.user_id.clone();
        Ok(created)
    }

    async fn update_notes(
        &self,
        _id: &ApplicationId,
        _user_id: &str,
        _notes: &str,
    ) -> Result<(), GatewayError> {
        self.take_failure()
    }

    async fn delete_for_job(&self, job_id: &str, user_id: &str) -> Result<(), GatewayError> {
        self.take_failure()?;
        self.deletes
            .lock()
            .expect("deletes mutex poisoned")
            .push((job_id.to_string(), user_id.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    pub(super) messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub(super) fn errors(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("notifier mutex poisoned")
            .iter()
            .filter(|(severity, _)| *severity == Severity::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .expect("notifier mutex poisoned")
            .push((severity, message.to_string()));
    }
}

pub(super) fn build_sync(
    applications: Vec<Application>,
) -> (
    BoardSync<MockGateway, RecordingNotifier>,
    Arc<MockGateway>,
    Arc<RecordingNotifier>,
) {
    let gateway = Arc::new(MockGateway::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let sync = BoardSync::new(
        BoardStore::from_applications(applications),
        gateway.clone(),
        notifier.clone(),
    );
    (sync, gateway, notifier)
}
