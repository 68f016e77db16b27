//! Pure month-grid derivation for the calendar view.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{Interview, InterviewKind};
use super::repository::CalendarError;

/// One interview placed on a day cell, sorted by start time within the day.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSlot {
    pub interview_id: String,
    pub company: String,
    pub kind: InterviewKind,
    pub starts_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Leading/trailing days that pad the grid to whole weeks.
    pub in_month: bool,
    pub interviews: Vec<InterviewSlot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Sunday-first weeks covering the whole month.
    pub weeks: Vec<Vec<DayCell>>,
}

/// Lay a month out as whole Sunday-first weeks with every interview bucketed
/// on its (UTC) day.
pub fn month_grid(
    year: i32,
    month: u32,
    interviews: &[Interview],
) -> Result<MonthGrid, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalendarError::Validation(format!("invalid month {year}-{month:02}")))?;

    let lead = first.weekday().num_days_from_sunday() as i64;
    let mut cursor = first - Duration::days(lead);
    let mut weeks = Vec::new();

    loop {
        let mut week = Vec::with_capacity(7);
        for _ in 0..7 {
            let date = cursor;
            let mut slots: Vec<InterviewSlot> = interviews
                .iter()
                .filter(|interview| interview.scheduled_at.date_naive() == date)
                .map(|interview| InterviewSlot {
                    interview_id: interview.id.clone(),
                    company: interview.company.clone(),
                    kind: interview.kind,
                    starts_at: interview.scheduled_at,
                })
                .collect();
            slots.sort_by_key(|slot| slot.starts_at);

            week.push(DayCell {
                date,
                in_month: date.year() == year && date.month() == month,
                interviews: slots,
            });
            cursor = cursor + Duration::days(1);
        }
        weeks.push(week);

        if cursor.year() != year || cursor.month() != month {
            break;
        }
    }

    Ok(MonthGrid { year, month, weeks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn interview(id: &str, at: DateTime<Utc>) -> Interview {
        Interview {
            id: id.to_string(),
            application_id: None,
            user_id: "user-1".to_string(),
            company: "Initech".to_string(),
            scheduled_at: at,
            kind: InterviewKind::Phone,
            location: None,
            notes: String::new(),
        }
    }

    #[test]
    fn grid_covers_whole_weeks() {
        let grid = month_grid(2026, 8, &[]).expect("valid month");

        // August 2026 starts on a Saturday and ends on a Monday.
        assert_eq!(grid.weeks.len(), 6);
        for week in &grid.weeks {
            assert_eq!(week.len(), 7);
        }
        let first = &grid.weeks[0][0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 7, 26).unwrap());
        assert!(!first.in_month);
        let day_one = &grid.weeks[0][6];
        assert_eq!(day_one.date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert!(day_one.in_month);
    }

    #[test]
    fn month_starting_sunday_has_no_lead_padding() {
        let grid = month_grid(2026, 2, &[]).expect("valid month");

        // February 2026 starts on a Sunday and spans exactly four weeks.
        assert_eq!(grid.weeks.len(), 4);
        assert_eq!(
            grid.weeks[0][0].date,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
        assert!(grid.weeks.iter().flatten().all(|cell| cell.in_month));
    }

    #[test]
    fn interviews_land_on_their_day_sorted_by_time() {
        let later = Utc.with_ymd_and_hms(2026, 8, 12, 15, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2026, 8, 12, 9, 30, 0).unwrap();
        let other_month = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let interviews = vec![
            interview("itv-2", later),
            interview("itv-1", earlier),
            interview("itv-3", other_month),
        ];

        let grid = month_grid(2026, 8, &interviews).expect("valid month");
        let cell = grid
            .weeks
            .iter()
            .flatten()
            .find(|cell| cell.date == NaiveDate::from_ymd_opt(2026, 8, 12).unwrap())
            .expect("day present");

        let ids: Vec<&str> = cell
            .interviews
            .iter()
            .map(|slot| slot.interview_id.as_str())
            .collect();
        assert_eq!(ids, vec!["itv-1", "itv-2"]);
    }

    #[test]
    fn rejects_invalid_month() {
        match month_grid(2026, 13, &[]) {
            Err(CalendarError::Validation(message)) => {
                assert!(message.contains("2026-13"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
