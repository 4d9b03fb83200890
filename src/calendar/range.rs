use crate::calendar::{ViewMode, WeekStart};
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Inclusive span of days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn len_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Every day in the range, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Days split into rows of seven
    pub fn weeks(&self) -> Vec<Vec<NaiveDate>> {
        let days: Vec<NaiveDate> = self.days().collect();
        days.chunks(7).map(|week| week.to_vec()).collect()
    }
}

/// First day of the week containing `date`
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let offset = match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    add_days(date, -(offset as i64)).unwrap_or(NaiveDate::MIN)
}

/// Last day of the week containing `date`
pub fn end_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    add_days(start_of_week(date, week_start), 6).unwrap_or(NaiveDate::MAX)
}

/// `date` moved by `days`, or `None` past the representable calendar
fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    match first_of_month(date).checked_add_months(Months::new(1)) {
        Some(next) => next - Duration::days(1),
        None => NaiveDate::MAX,
    }
}

/// Days shown for a window anchored on `anchor`.
///
/// Two-week windows start on the anchor's week and span 14 days. Month
/// windows cover whole weeks from the week holding the 1st to the week
/// holding the last day of the anchor's month.
pub fn visible_range(anchor: NaiveDate, mode: ViewMode, week_start: WeekStart) -> DateRange {
    match mode {
        ViewMode::TwoWeek => {
            let start = start_of_week(anchor, week_start);
            DateRange::new(start, add_days(start, 13).unwrap_or(NaiveDate::MAX))
        }
        ViewMode::Month => DateRange::new(
            start_of_week(first_of_month(anchor), week_start),
            end_of_week(last_of_month(anchor), week_start),
        ),
    }
}

/// Move an anchor by `steps` pages: 14 days per step for two-week windows,
/// one calendar month per step for month windows (day clamped to month end).
/// A move past the representable calendar leaves the anchor where it is.
pub fn navigate(anchor: NaiveDate, mode: ViewMode, steps: i32) -> NaiveDate {
    match mode {
        ViewMode::TwoWeek => add_days(anchor, 14 * steps as i64).unwrap_or(anchor),
        ViewMode::Month => {
            let months = Months::new(steps.unsigned_abs());
            let moved = if steps >= 0 {
                anchor.checked_add_months(months)
            } else {
                anchor.checked_sub_months(months)
            };
            moved.unwrap_or(anchor)
        }
    }
}
