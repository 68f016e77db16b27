use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{Company, CompanyDraft, Job, JobDraft, Partner, PartnerDraft};
use super::repository::{CatalogError, CompanyStore, JobStore, PartnerStore};

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static PARTNER_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static COMPANY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_id(prefix: &str, sequence: &AtomicU64) -> String {
    let id = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

/// Listing filter for the job board.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Case-insensitive tag match against any of a job's tags.
    pub tag: Option<String>,
    /// Inactive listings are hidden unless an admin asks for them.
    pub include_inactive: bool,
}

/// Service composing the three catalog stores.
pub struct CatalogService<J, P, C> {
    jobs: Arc<J>,
    partners: Arc<P>,
    companies: Arc<C>,
}

impl<J, P, C> CatalogService<J, P, C>
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    pub fn new(jobs: Arc<J>, partners: Arc<P>, companies: Arc<C>) -> Self {
        Self {
            jobs,
            partners,
            companies,
        }
    }

    pub fn create_job(&self, draft: JobDraft) -> Result<Job, CatalogError> {
        require("title", &draft.title)?;
        require("company", &draft.company)?;

        let job = Job {
            id: next_id("job", &JOB_SEQUENCE),
            title: draft.title,
            company: draft.company,
            location: draft.location,
            description: draft.description,
            tags: draft.tags,
            posted_at: Utc::now(),
            active: draft.active,
        };
        self.jobs.insert(job)
    }

    /// Jobs newest-first, filtered by tag and activity.
    pub fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, CatalogError> {
        let mut jobs = self.jobs.list()?;
        jobs.retain(|job| filter.include_inactive || job.active);
        if let Some(tag) = &filter.tag {
            jobs.retain(|job| {
                job.tags
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(tag))
            });
        }
        jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(jobs)
    }

    pub fn get_job(&self, id: &str) -> Result<Job, CatalogError> {
        self.jobs.fetch(id)?.ok_or(CatalogError::NotFound("job"))
    }

    /// Full-replace update; the id and original posting date survive.
    pub fn update_job(&self, id: &str, draft: JobDraft) -> Result<Job, CatalogError> {
        require("title", &draft.title)?;
        require("company", &draft.company)?;

        let existing = self.get_job(id)?;
        let job = Job {
            id: existing.id,
            title: draft.title,
            company: draft.company,
            location: draft.location,
            description: draft.description,
            tags: draft.tags,
            posted_at: existing.posted_at,
            active: draft.active,
        };
        self.jobs.update(job.clone())?;
        Ok(job)
    }

    pub fn delete_job(&self, id: &str) -> Result<(), CatalogError> {
        self.jobs.delete(id)
    }

    pub fn create_partner(&self, draft: PartnerDraft) -> Result<Partner, CatalogError> {
        require("name", &draft.name)?;

        let partner = Partner {
            id: next_id("partner", &PARTNER_SEQUENCE),
            name: draft.name,
            industry: draft.industry,
            website: draft.website,
            contact_email: draft.contact_email,
            active: draft.active,
        };
        self.partners.insert(partner)
    }

    pub fn list_partners(&self) -> Result<Vec<Partner>, CatalogError> {
        let mut partners = self.partners.list()?;
        partners.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(partners)
    }

    pub fn get_partner(&self, id: &str) -> Result<Partner, CatalogError> {
        self.partners
            .fetch(id)?
            .ok_or(CatalogError::NotFound("partner"))
    }

    pub fn update_partner(&self, id: &str, draft: PartnerDraft) -> Result<Partner, CatalogError> {
        require("name", &draft.name)?;

        let existing = self.get_partner(id)?;
        let partner = Partner {
            id: existing.id,
            name: draft.name,
            industry: draft.industry,
            website: draft.website,
            contact_email: draft.contact_email,
            active: draft.active,
        };
        self.partners.update(partner.clone())?;
        Ok(partner)
    }

    pub fn delete_partner(&self, id: &str) -> Result<(), CatalogError> {
        self.partners.delete(id)
    }

    pub fn create_company(&self, draft: CompanyDraft) -> Result<Company, CatalogError> {
        require("name", &draft.name)?;

        let company = Company {
            id: next_id("company", &COMPANY_SEQUENCE),
            name: draft.name,
            website: draft.website,
            logo_key: draft.logo_key,
            description: draft.description,
        };
        self.companies.insert(company)
    }

    pub fn list_companies(&self) -> Result<Vec<Company>, CatalogError> {
        let mut companies = self.companies.list()?;
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    pub fn get_company(&self, id: &str) -> Result<Company, CatalogError> {
        self.companies
            .fetch(id)?
            .ok_or(CatalogError::NotFound("company"))
    }

    pub fn update_company(&self, id: &str, draft: CompanyDraft) -> Result<Company, CatalogError> {
        require("name", &draft.name)?;

        let existing = self.get_company(id)?;
        let company = Company {
            id: existing.id,
            name: draft.name,
            website: draft.website,
            logo_key: draft.logo_key,
            description: draft.description,
        };
        self.companies.update(company.clone())?;
        Ok(company)
    }

    pub fn delete_company(&self, id: &str) -> Result<(), CatalogError> {
        self.companies.delete(id)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        Err(CatalogError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}
