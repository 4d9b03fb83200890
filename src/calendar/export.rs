use crate::models::CalendarEvent;
use crate::utils::format_date;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct ExportRow<'a> {
    date: String,
    event: &'a str,
    video_id: &'a str,
    video_title: &'a str,
    status: &'a str,
}

/// Write one CSV row per video per event
pub fn write_csv<W: Write>(events: &[CalendarEvent], writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for event in events {
        for video in &event.videos {
            csv.serialize(ExportRow {
                date: format_date(event.date),
                event: &event.title,
                video_id: &video.id,
                video_title: &video.title,
                status: video.status.as_str(),
            })?;
            rows += 1;
        }
    }

    csv.flush().context("Failed to flush CSV output")?;
    Ok(rows)
}

/// Export events to a CSV file, returning the number of rows written
pub fn export_csv<P: AsRef<Path>>(events: &[CalendarEvent], path: P) -> Result<usize> {
    let file = std::fs::File::create(path.as_ref())
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
    write_csv(events, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{group_by_project, DateRange};
    use crate::models::{Video, VideoStatus};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn events() -> Vec<CalendarEvent> {
        let videos = vec![
            Video::new("a", "Remodel - Demo", "u-3", "u-2", date(2024, 4, 1), "a.mp4")
                .with_status(VideoStatus::Approved)
                .with_publish_dates(vec![date(2024, 4, 9)]),
            Video::new("b", "Remodel - Tiles", "u-3", "u-2", date(2024, 4, 1), "b.mp4")
                .with_status(VideoStatus::Approved)
                .with_publish_dates(vec![date(2024, 4, 9)]),
        ];
        group_by_project(&videos, &DateRange::new(date(2024, 4, 7), date(2024, 4, 20)))
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        let rows = write_csv(&events(), &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(rows, 2);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "date,event,video_id,video_title,status");
        assert_eq!(lines[1], "2024-04-09,Remodel,a,Remodel - Demo,approved");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_csv_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("calendar.csv");

        let rows = export_csv(&events(), &path).unwrap();
        assert_eq!(rows, 2);
        assert!(std::fs::read_to_string(&path).unwrap().contains("Remodel - Tiles"));
    }

    #[test]
    fn test_write_csv_empty() {
        let mut buffer = Vec::new();
        assert_eq!(write_csv(&[], &mut buffer).unwrap(), 0);
    }
}
