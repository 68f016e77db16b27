//! Interview scheduling: CRUD over interview records and the pure month-grid
//! derivation behind the admin calendar view.

pub mod domain;
pub mod grid;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Interview, InterviewDraft, InterviewKind};
pub use grid::{month_grid, DayCell, InterviewSlot, MonthGrid};
pub use repository::{CalendarError, InterviewStore};
pub use router::calendar_router;
pub use service::CalendarService;
