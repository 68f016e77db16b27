//! Server-side application records: repository seam, service rules, and the
//! REST surface consumed by the applicant board.

pub mod repository;
pub mod router;
pub mod service;
pub mod views;

pub use repository::{ApplicationRepository, JobDirectory, RepositoryError};
pub use router::application_router;
pub use service::{
    ApplicationChange, ApplicationService, ApplicationServiceError, NewApplication,
};
pub use views::{Ack, ApplicationView, ApplicationsEnvelope, CreatedEnvelope, JobSummaryView};
