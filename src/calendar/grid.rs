use crate::calendar::{DateRange, ViewMode};
use crate::models::{CalendarEvent, Video};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// One day of the calendar grid
#[derive(Debug, Clone)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading and trailing days a month window borrows
    /// from its neighbours
    pub in_focus_month: bool,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

/// Videos per publish day inside `range`.
/// A video scheduled on several visible days lands in each of them.
pub fn bucket_videos<'a, I>(videos: I, range: &DateRange) -> BTreeMap<NaiveDate, Vec<Video>>
where
    I: IntoIterator<Item = &'a Video>,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<Video>> = BTreeMap::new();
    for video in videos {
        for date in &video.publish_dates {
            if range.contains(*date) {
                buckets.entry(*date).or_default().push(video.clone());
            }
        }
    }
    buckets
}

/// Lay events out over every day of `range`
pub fn build_grid(
    range: &DateRange,
    mode: ViewMode,
    anchor: NaiveDate,
    today: NaiveDate,
    events: &[CalendarEvent],
) -> Vec<DayCell> {
    let mut by_day: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
    for event in events {
        by_day.entry(event.date).or_default().push(event.clone());
    }

    range
        .days()
        .map(|date| DayCell {
            date,
            in_focus_month: match mode {
                ViewMode::TwoWeek => true,
                ViewMode::Month => date.year() == anchor.year() && date.month() == anchor.month(),
            },
            is_today: date == today,
            events: by_day.remove(&date).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{group_by_date, visible_range, WeekStart};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn video(id: &str, title: &str, dates: Vec<NaiveDate>) -> Video {
        Video::new(id, title, "u-3", "u-2", date(2024, 4, 1), format!("{}.mp4", id))
            .with_publish_dates(dates)
    }

    #[test]
    fn test_bucket_ignores_out_of_range_dates() {
        let range = DateRange::new(date(2024, 4, 7), date(2024, 4, 20));
        let videos = vec![
            video("a", "Inside", vec![date(2024, 4, 8)]),
            video("b", "Outside", vec![date(2024, 5, 8)]),
            video("c", "Unscheduled", vec![]),
        ];

        let buckets = bucket_videos(&videos, &range);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&date(2024, 4, 8)][0].id, "a");
    }

    #[test]
    fn test_bucket_repeats_multi_date_video() {
        let range = DateRange::new(date(2024, 4, 7), date(2024, 4, 20));
        let videos = vec![video("a", "Twice", vec![date(2024, 4, 8), date(2024, 4, 15)])];

        let buckets = bucket_videos(&videos, &range);
        assert_eq!(buckets.len(), 2);
        assert!(buckets.values().all(|v| v.len() == 1 && v[0].id == "a"));
    }

    #[test]
    fn test_grid_marks_focus_month_and_today() {
        let anchor = date(2024, 4, 10);
        let range = visible_range(anchor, ViewMode::Month, WeekStart::Sunday);
        let grid = build_grid(&range, ViewMode::Month, anchor, date(2024, 4, 3), &[]);

        assert_eq!(grid.len(), range.len_days());
        assert!(!grid[0].in_focus_month); // March 31
        assert!(grid.iter().filter(|c| c.in_focus_month).count() == 30);
        assert_eq!(grid.iter().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn test_grid_attaches_events() {
        let anchor = date(2024, 4, 10);
        let range = visible_range(anchor, ViewMode::TwoWeek, WeekStart::Sunday);
        let videos = vec![
            video("a", "One", vec![date(2024, 4, 9)]),
            video("b", "Two", vec![date(2024, 4, 9)]),
        ];
        let events = group_by_date(&videos, &range);
        let grid = build_grid(&range, ViewMode::TwoWeek, anchor, anchor, &events);

        let cell = grid.iter().find(|c| c.date == date(2024, 4, 9)).unwrap();
        assert_eq!(cell.events.len(), 1);
        assert_eq!(cell.events[0].videos.len(), 2);
        assert!(grid.iter().all(|c| c.in_focus_month));
    }
}
