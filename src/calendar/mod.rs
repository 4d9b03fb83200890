pub mod export;
pub mod grid;
pub mod grouping;
pub mod range;
pub mod reschedule;

pub use export::{export_csv, write_csv};
pub use grid::{bucket_videos, build_grid, DayCell};
pub use grouping::{group_by_date, group_by_project, series_prefix, Grouping};
pub use range::{navigate, start_of_week, visible_range, DateRange};
pub use reschedule::{add_date, move_date, remove_date};

use crate::models::{CalendarEvent, Video};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Width of the visible calendar window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    TwoWeek,
    Month,
}

/// First day of a calendar row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

/// A calendar window anchored on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub anchor: NaiveDate,
    pub mode: ViewMode,
    pub week_start: WeekStart,
}

impl CalendarView {
    pub fn new(anchor: NaiveDate, mode: ViewMode, week_start: WeekStart) -> Self {
        Self {
            anchor,
            mode,
            week_start,
        }
    }

    pub fn range(&self) -> DateRange {
        visible_range(self.anchor, self.mode, self.week_start)
    }

    /// Move the window forward (positive) or back (negative) by whole pages
    pub fn shift(&mut self, steps: i32) {
        self.anchor = navigate(self.anchor, self.mode, steps);
    }

    pub fn next(&mut self) {
        self.shift(1);
    }

    pub fn previous(&mut self) {
        self.shift(-1);
    }

    /// Events for the videos scheduled inside the window
    pub fn events<'a, I>(&self, videos: I, grouping: Grouping) -> Vec<CalendarEvent>
    where
        I: IntoIterator<Item = &'a Video>,
    {
        let range = self.range();
        match grouping {
            Grouping::ByDate => group_by_date(videos, &range),
            Grouping::ByProject => group_by_project(videos, &range),
        }
    }

    /// Day cells for the window with events placed on their days
    pub fn grid<'a, I>(&self, videos: I, grouping: Grouping, today: NaiveDate) -> Vec<DayCell>
    where
        I: IntoIterator<Item = &'a Video>,
    {
        let events = self.events(videos, grouping);
        build_grid(&self.range(), self.mode, self.anchor, today, &events)
    }

    /// Heading for the window, e.g. "April 2024" or "Apr 07 – Apr 20, 2024"
    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Month => self.anchor.format("%B %Y").to_string(),
            ViewMode::TwoWeek => {
                let range = self.range();
                if range.start.year() == range.end.year() {
                    format!(
                        "{} – {}",
                        range.start.format("%b %d"),
                        range.end.format("%b %d, %Y")
                    )
                } else {
                    format!(
                        "{} – {}",
                        range.start.format("%b %d, %Y"),
                        range.end.format("%b %d, %Y")
                    )
                }
            }
        }
    }
}
