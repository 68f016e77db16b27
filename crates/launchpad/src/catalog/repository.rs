use super::domain::{Company, Job, Partner};

/// Error enumeration shared by the catalog stores and service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

pub trait JobStore: Send + Sync {
    fn insert(&self, job: Job) -> Result<Job, CatalogError>;
    fn update(&self, job: Job) -> Result<(), CatalogError>;
    fn fetch(&self, id: &str) -> Result<Option<Job>, CatalogError>;
    fn list(&self) -> Result<Vec<Job>, CatalogError>;
    fn delete(&self, id: &str) -> Result<(), CatalogError>;
}

pub trait PartnerStore: Send + Sync {
    fn insert(&self, partner: Partner) -> Result<Partner, CatalogError>;
    fn update(&self, partner: Partner) -> Result<(), CatalogError>;
    fn fetch(&self, id: &str) -> Result<Option<Partner>, CatalogError>;
    fn list(&self) -> Result<Vec<Partner>, CatalogError>;
    fn delete(&self, id: &str) -> Result<(), CatalogError>;
}

pub trait CompanyStore: Send + Sync {
    fn insert(&self, company: Company) -> Result<Company, CatalogError>;
    fn update(&self, company: Company) -> Result<(), CatalogError>;
    fn fetch(&self, id: &str) -> Result<Option<Company>, CatalogError>;
    fn list(&self) -> Result<Vec<Company>, CatalogError>;
    fn delete(&self, id: &str) -> Result<(), CatalogError>;
}
