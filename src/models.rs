use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who is using the desk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
    Freelancer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
            Role::Freelancer => "freelancer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A desk account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Review state of a video
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum VideoStatus {
    InProgress,
    Submitted,
    Approved,
    Rejected,
}

impl VideoStatus {
    pub const ALL: [VideoStatus; 4] = [
        VideoStatus::InProgress,
        VideoStatus::Submitted,
        VideoStatus::Approved,
        VideoStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::InProgress => "in-progress",
            VideoStatus::Submitted => "submitted",
            VideoStatus::Approved => "approved",
            VideoStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "in-progress" | "inprogress" | "draft" => Ok(VideoStatus::InProgress),
            "submitted" | "pending" => Ok(VideoStatus::Submitted),
            "approved" => Ok(VideoStatus::Approved),
            "rejected" => Ok(VideoStatus::Rejected),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Marketing copy attached to a video
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AiContent {
    pub hook: String,
    pub caption: String,
    pub cta: String,
    pub email_copy: String,
}

/// An uploaded asset moving through review and onto the calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: VideoStatus,
    /// Id of the user who uploaded the video
    pub uploaded_by: String,
    /// Id of the client the video is made for
    pub client_id: String,
    pub upload_date: NaiveDate,
    /// Days the video is scheduled to go out, kept sorted and unique
    #[serde(default)]
    pub publish_dates: Vec<NaiveDate>,
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub ai_content: Option<AiContent>,
}

impl Video {
    /// Create a new video in progress with no schedule
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        uploaded_by: impl Into<String>,
        client_id: impl Into<String>,
        upload_date: NaiveDate,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: VideoStatus::InProgress,
            uploaded_by: uploaded_by.into(),
            client_id: client_id.into(),
            upload_date,
            publish_dates: Vec::new(),
            file_name: file_name.into(),
            file_size: 0,
            preview_url: None,
            content_hash: None,
            tags: Vec::new(),
            feedback: None,
            ai_content: None,
        }
    }

    pub fn with_status(mut self, status: VideoStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_publish_dates(mut self, mut dates: Vec<NaiveDate>) -> Self {
        dates.sort();
        dates.dedup();
        self.publish_dates = dates;
        self
    }

    pub fn is_scheduled(&self) -> bool {
        !self.publish_dates.is_empty()
    }

    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        self.publish_dates.binary_search(&date).is_ok()
    }
}

/// Display-only grouping of the videos that go out on one day
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub videos: Vec<Video>,
}

impl CalendarEvent {
    /// True when the event bundles several videos
    pub fn is_project(&self) -> bool {
        self.videos.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_video_creation_defaults() {
        let video = Video::new("vid-1", "Intro", "u-3", "u-2", date(2024, 5, 1), "intro.mp4");
        assert_eq!(video.status, VideoStatus::InProgress);
        assert!(!video.is_scheduled());
        assert!(video.feedback.is_none());
    }

    #[test]
    fn test_publish_dates_sorted_and_unique() {
        let video = Video::new("vid-1", "Intro", "u-3", "u-2", date(2024, 5, 1), "intro.mp4")
            .with_publish_dates(vec![date(2024, 5, 9), date(2024, 5, 3), date(2024, 5, 9)]);
        assert_eq!(video.publish_dates, vec![date(2024, 5, 3), date(2024, 5, 9)]);
        assert!(video.is_scheduled_on(date(2024, 5, 9)));
        assert!(!video.is_scheduled_on(date(2024, 5, 4)));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&VideoStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let status: VideoStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, VideoStatus::Rejected);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("In_Progress".parse::<VideoStatus>(), Ok(VideoStatus::InProgress));
        assert_eq!("pending".parse::<VideoStatus>(), Ok(VideoStatus::Submitted));
        assert!("archived".parse::<VideoStatus>().is_err());
    }

    #[test]
    fn test_video_deserializes_with_missing_optional_fields() {
        let json = r#"{
            "id": "vid-9",
            "title": "Minimal",
            "status": "approved",
            "uploaded_by": "u-3",
            "client_id": "u-2",
            "upload_date": "2024-05-01",
            "file_name": "minimal.mp4"
        }"#;
        let video: Video = serde_json::from_str(json).unwrap();
        assert_eq!(video.status, VideoStatus::Approved);
        assert!(video.publish_dates.is_empty());
        assert!(video.ai_content.is_none());
    }

    #[test]
    fn test_calendar_event_is_project() {
        let video = Video::new("vid-1", "Intro", "u-3", "u-2", date(2024, 5, 1), "intro.mp4");
        let mut event = CalendarEvent {
            id: "evt-2024-05-01-intro".to_string(),
            date: date(2024, 5, 1),
            title: "Intro".to_string(),
            videos: vec![video.clone()],
        };
        assert!(!event.is_project());
        event.videos.push(video);
        assert!(event.is_project());
    }
}
