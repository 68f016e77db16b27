use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{Interview, InterviewDraft};
use super::grid::{month_grid, MonthGrid};
use super::repository::{CalendarError, InterviewStore};

static INTERVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_interview_id() -> String {
    let id = INTERVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("itv-{id:06}")
}

pub struct CalendarService<S> {
    interviews: Arc<S>,
}

impl<S> CalendarService<S>
where
    S: InterviewStore + 'static,
{
    pub fn new(interviews: Arc<S>) -> Self {
        Self { interviews }
    }

    pub fn schedule(&self, draft: InterviewDraft) -> Result<Interview, CalendarError> {
        validate(&draft)?;

        let interview = Interview {
            id: next_interview_id(),
            application_id: draft.application_id,
            user_id: draft.user_id,
            company: draft.company,
            scheduled_at: draft.scheduled_at,
            kind: draft.kind,
            location: draft.location,
            notes: draft.notes,
        };
        self.interviews.insert(interview)
    }

    pub fn reschedule(&self, id: &str, draft: InterviewDraft) -> Result<Interview, CalendarError> {
        validate(&draft)?;

        let existing = self
            .interviews
            .fetch(id)?
            .ok_or(CalendarError::NotFound)?;
        let interview = Interview {
            id: existing.id,
            application_id: draft.application_id,
            user_id: draft.user_id,
            company: draft.company,
            scheduled_at: draft.scheduled_at,
            kind: draft.kind,
            location: draft.location,
            notes: draft.notes,
        };
        self.interviews.update(interview.clone())?;
        Ok(interview)
    }

    pub fn cancel(&self, id: &str) -> Result<(), CalendarError> {
        self.interviews.delete(id)
    }

    /// One user's interviews, soonest first.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Interview>, CalendarError> {
        let mut interviews = self.interviews.list_for_user(user_id)?;
        interviews.sort_by_key(|interview| interview.scheduled_at);
        Ok(interviews)
    }

    /// The month grid for one user's interviews.
    pub fn month_view(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthGrid, CalendarError> {
        let interviews = self.interviews.list_for_user(user_id)?;
        month_grid(year, month, &interviews)
    }
}

fn validate(draft: &InterviewDraft) -> Result<(), CalendarError> {
    if draft.user_id.trim().is_empty() {
        return Err(CalendarError::Validation("user_id is required".to_string()));
    }
    if draft.company.trim().is_empty() {
        return Err(CalendarError::Validation("company is required".to_string()));
    }
    Ok(())
}
