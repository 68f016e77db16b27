use super::domain::Interview;

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("interview not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("calendar unavailable: {0}")]
    Unavailable(String),
}

pub trait InterviewStore: Send + Sync {
    fn insert(&self, interview: Interview) -> Result<Interview, CalendarError>;
    fn update(&self, interview: Interview) -> Result<(), CalendarError>;
    fn fetch(&self, id: &str) -> Result<Option<Interview>, CalendarError>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Interview>, CalendarError>;
    fn delete(&self, id: &str) -> Result<(), CalendarError>;
}
