use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use launchpad::applications::{
    ApplicationChange, ApplicationRepository, ApplicationService, ApplicationServiceError,
    JobDirectory, JobSummaryView, NewApplication, RepositoryError,
};
use launchpad::board::{
    Application, ApplicationDraft, ApplicationGateway, ApplicationId, ApplicationUpdate,
    GatewayError,
};
use launchpad::calendar::{CalendarError, Interview, InterviewStore};
use launchpad::catalog::{CatalogError, Company, CompanyStore, Job, JobStore, Partner, PartnerStore};
use launchpad::roster::{BulkInsert, User, UserStore, UserStoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<String, Application>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id.0) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.0.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: Application) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id.0) {
            guard.insert(record.id.0.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<Application> = guard
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.applied_at.cmp(&b.applied_at).then(a.id.0.cmp(&b.id.0)));
        Ok(records)
    }

    fn delete_for_job(&self, job_id: &str, user_id: &str) -> Result<usize, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|_, record| !(record.job_id == job_id && record.user_id == user_id));
        Ok(before - guard.len())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobStore {
    records: Arc<Mutex<HashMap<String, Job>>>,
}

impl JobStore for InMemoryJobStore {
    fn insert(&self, job: Job) -> Result<Job, CatalogError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: Job) -> Result<(), CatalogError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        if guard.contains_key(&job.id) {
            guard.insert(job.id.clone(), job);
            Ok(())
        } else {
            Err(CatalogError::NotFound("job"))
        }
    }

    fn fetch(&self, id: &str) -> Result<Option<Job>, CatalogError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Job>, CatalogError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(CatalogError::NotFound("job"))
    }
}

/// The job store doubles as the lookup behind the nested `jobs` summary on
/// application listings.
impl JobDirectory for InMemoryJobStore {
    fn job_summary(&self, job_id: &str) -> Option<JobSummaryView> {
        let guard = self.records.lock().expect("job mutex poisoned");
        guard.get(job_id).map(|job| JobSummaryView {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
        })
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPartnerStore {
    records: Arc<Mutex<HashMap<String, Partner>>>,
}

impl PartnerStore for InMemoryPartnerStore {
    fn insert(&self, partner: Partner) -> Result<Partner, CatalogError> {
        let mut guard = self.records.lock().expect("partner mutex poisoned");
        guard.insert(partner.id.clone(), partner.clone());
        Ok(partner)
    }

    fn update(&self, partner: Partner) -> Result<(), CatalogError> {
        let mut guard = self.records.lock().expect("partner mutex poisoned");
        if guard.contains_key(&partner.id) {
            guard.insert(partner.id.clone(), partner);
            Ok(())
        } else {
            Err(CatalogError::NotFound("partner"))
        }
    }

    fn fetch(&self, id: &str) -> Result<Option<Partner>, CatalogError> {
        let guard = self.records.lock().expect("partner mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Partner>, CatalogError> {
        let guard = self.records.lock().expect("partner mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let mut guard = self.records.lock().expect("partner mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(CatalogError::NotFound("partner"))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCompanyStore {
    records: Arc<Mutex<HashMap<String, Company>>>,
}

impl CompanyStore for InMemoryCompanyStore {
    fn insert(&self, company: Company) -> Result<Company, CatalogError> {
        let mut guard = self.records.lock().expect("company mutex poisoned");
        guard.insert(company.id.clone(), company.clone());
        Ok(company)
    }

    fn update(&self, company: Company) -> Result<(), CatalogError> {
        let mut guard = self.records.lock().expect("company mutex poisoned");
        if guard.contains_key(&company.id) {
            guard.insert(company.id.clone(), company);
            Ok(())
        } else {
            Err(CatalogError::NotFound("company"))
        }
    }

    fn fetch(&self, id: &str) -> Result<Option<Company>, CatalogError> {
        let guard = self.records.lock().expect("company mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Company>, CatalogError> {
        let guard = self.records.lock().expect("company mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let mut guard = self.records.lock().expect("company mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(CatalogError::NotFound("company"))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryInterviewStore {
    records: Arc<Mutex<HashMap<String, Interview>>>,
}

impl InterviewStore for InMemoryInterviewStore {
    fn insert(&self, interview: Interview) -> Result<Interview, CalendarError> {
        let mut guard = self.records.lock().expect("interview mutex poisoned");
        guard.insert(interview.id.clone(), interview.clone());
        Ok(interview)
    }

    fn update(&self, interview: Interview) -> Result<(), CalendarError> {
        let mut guard = self.records.lock().expect("interview mutex poisoned");
        if guard.contains_key(&interview.id) {
            guard.insert(interview.id.clone(), interview);
            Ok(())
        } else {
            Err(CalendarError::NotFound)
        }
    }

    fn fetch(&self, id: &str) -> Result<Option<Interview>, CalendarError> {
        let guard = self.records.lock().expect("interview mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Interview>, CalendarError> {
        let guard = self.records.lock().expect("interview mutex poisoned");
        Ok(guard
            .values()
            .filter(|interview| interview.user_id == user_id)
            .cloned()
            .collect())
    }

    fn delete(&self, id: &str) -> Result<(), CalendarError> {
        let mut guard = self.records.lock().expect("interview mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(CalendarError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUserStore {
    emails: Arc<Mutex<HashSet<String>>>,
}

impl UserStore for InMemoryUserStore {
    fn insert_many(&self, users: Vec<User>) -> Result<BulkInsert, UserStoreError> {
        let mut guard = self.emails.lock().expect("user mutex poisoned");
        let mut report = BulkInsert::default();
        for user in users {
            if guard.insert(user.email.to_ascii_lowercase()) {
                report.inserted.push(user);
            } else {
                report.conflicts.push(user.email);
            }
        }
        Ok(report)
    }
}

/// Gateway that calls the application service in-process, used by the CLI
/// demo so the whole pipeline loop runs without a network.
pub(crate) struct ServiceGateway<R, J> {
    service: Arc<ApplicationService<R, J>>,
}

impl<R, J> ServiceGateway<R, J> {
    pub(crate) fn new(service: Arc<ApplicationService<R, J>>) -> Self {
        Self { service }
    }
}

fn to_gateway_error(err: ApplicationServiceError) -> GatewayError {
    match err {
        ApplicationServiceError::Repository(RepositoryError::Unavailable(message)) => {
            GatewayError::Network(message)
        }
        other => GatewayError::Rejected(other.to_string()),
    }
}

impl<R, J> ApplicationGateway for ServiceGateway<R, J>
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
{
    async fn fetch(&self, user_id: &str) -> Result<Vec<Application>, GatewayError> {
        let views = self.service.list(user_id).map_err(to_gateway_error)?;
        Ok(views
            .into_iter()
            .map(|view| view.into_application(user_id))
            .collect())
    }

    async fn update(
        &self,
        id: &ApplicationId,
        update: &ApplicationUpdate,
    ) -> Result<(), GatewayError> {
        let change = ApplicationChange {
            status: update.status,
            sub_stage: update.sub_stage.clone(),
            archived: update.archived,
        };
        self.service
            .apply_change(id, change)
            .map(|_| ())
            .map_err(to_gateway_error)
    }

    async fn create(&self, draft: &ApplicationDraft) -> Result<Application, GatewayError> {
        self.service
            .create(NewApplication {
                user_id: draft.user_id.clone(),
                job_id: draft.job_id.clone(),
                status: draft.status,
                resume_id: draft.resume_id.clone(),
                position: draft.position.clone(),
            })
            .map_err(to_gateway_error)
    }

    async fn update_notes(
        &self,
        id: &ApplicationId,
        user_id: &str,
        notes: &str,
    ) -> Result<(), GatewayError> {
        self.service
            .update_notes(id, user_id, notes)
            .map_err(to_gateway_error)
    }

    async fn delete_for_job(&self, job_id: &str, user_id: &str) -> Result<(), GatewayError> {
        self.service
            .delete_for_job(job_id, user_id)
            .map(|_| ())
            .map_err(to_gateway_error)
    }
}
