//! Partner, company, and job listing management for the admin console.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Company, CompanyDraft, Job, JobDraft, Partner, PartnerDraft};
pub use repository::{CatalogError, CompanyStore, JobStore, PartnerStore};
pub use router::catalog_router;
pub use service::{CatalogService, JobFilter};
