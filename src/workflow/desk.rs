use crate::auth::SessionStore;
use crate::calendar;
use crate::config::Config;
use crate::constants::{SESSION_FILE, VIDEOS_FILE};
use crate::error::WorkflowError;
use crate::models::{AiContent, User, Video, VideoStatus};
use crate::store::{VideoRepository, VideoStore};
use crate::upload::UploadSink;
use crate::workflow::{authorize, can_view, review, Action, DashboardStats};
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashSet;

type Outcome<T> = std::result::Result<T, WorkflowError>;

/// The signed-in view of the video store: every operation is checked
/// against the current user's role before it touches a video
pub struct Desk {
    session: SessionStore,
    videos: Box<dyn VideoRepository>,
}

impl Desk {
    pub fn new(session: SessionStore, videos: Box<dyn VideoRepository>) -> Self {
        Self { session, videos }
    }

    /// Open the session and video store described by `config`. With
    /// persistence off both live in memory and the demo data is seeded
    /// around `today`.
    pub fn open(config: &Config, today: NaiveDate) -> Result<Self> {
        if !config.storage.persist {
            return Ok(Self::new(
                SessionStore::in_memory(),
                Box::new(VideoStore::in_memory_seeded(today)),
            ));
        }

        let data_dir = config.data_dir()?;
        let session = SessionStore::open(data_dir.join(SESSION_FILE))?;
        let videos = VideoStore::open(data_dir.join(VIDEOS_FILE), today)?;
        Ok(Self::new(session, Box::new(videos)))
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn user(&self) -> Outcome<&User> {
        self.session.require()
    }

    /// Videos the current user may see, in store order
    pub fn visible(&self) -> Outcome<Vec<&Video>> {
        let user = self.user()?;
        Ok(self.videos.all().iter().filter(|v| can_view(user, v)).collect())
    }

    pub fn visible_with_status(&self, status: VideoStatus) -> Outcome<Vec<&Video>> {
        Ok(self
            .visible()?
            .into_iter()
            .filter(|v| v.status == status)
            .collect())
    }

    /// The signed-in user, if their role may upload
    pub fn can_upload(&self) -> Outcome<&User> {
        let user = self.user()?;
        authorize(user, Action::Upload, None)?;
        Ok(user)
    }

    /// A single visible video. Videos hidden from the user read as missing.
    pub fn video(&self, id: &str) -> Outcome<&Video> {
        let user = self.user()?;
        self.videos
            .get(id)
            .filter(|v| can_view(user, v))
            .ok_or_else(|| WorkflowError::VideoNotFound(id.to_string()))
    }

    /// Content hashes of every stored video, for upload de-duplication
    pub fn known_hashes(&self) -> HashSet<String> {
        self.videos
            .all()
            .iter()
            .filter_map(|v| v.content_hash.clone())
            .collect()
    }

    fn modify<F>(&mut self, id: &str, action: Action, change: F) -> Outcome<Video>
    where
        F: FnOnce(&mut Video) -> Outcome<()>,
    {
        let user = self.session.require()?.clone();
        let video = self
            .videos
            .get_mut(id)
            .filter(|v| can_view(&user, v))
            .ok_or_else(|| WorkflowError::VideoNotFound(id.to_string()))?;

        authorize(&user, action, Some(&*video))?;

        // Apply to a copy so a failed change leaves the stored video untouched
        let mut updated = video.clone();
        change(&mut updated)?;
        *video = updated.clone();

        log::info!("{} {} ({})", user.email, action.describe(), id);
        Ok(updated)
    }

    pub fn submit(&mut self, id: &str) -> Outcome<Video> {
        self.modify(id, Action::Submit, review::submit)
    }

    pub fn rework(&mut self, id: &str) -> Outcome<Video> {
        self.modify(id, Action::Rework, review::rework)
    }

    pub fn approve(&mut self, id: &str, feedback: Option<&str>) -> Outcome<Video> {
        self.modify(id, Action::Review, |v| review::approve(v, feedback))
    }

    pub fn reject(&mut self, id: &str, feedback: &str) -> Outcome<Video> {
        self.modify(id, Action::Review, |v| review::reject(v, feedback))
    }

    /// Add a publish date to an approved video
    pub fn schedule(&mut self, id: &str, date: NaiveDate) -> Outcome<Video> {
        self.modify(id, Action::Schedule, |v| {
            ensure_schedulable(v)?;
            calendar::add_date(v, date);
            Ok(())
        })
    }

    pub fn unschedule(&mut self, id: &str, date: NaiveDate) -> Outcome<Video> {
        self.modify(id, Action::Schedule, |v| calendar::remove_date(v, date))
    }

    /// Drag a video from one calendar day to another
    pub fn reschedule(&mut self, id: &str, from: NaiveDate, to: NaiveDate) -> Outcome<Video> {
        self.modify(id, Action::Schedule, |v| {
            ensure_schedulable(v)?;
            calendar::move_date(v, from, to)
        })
    }

    pub fn attach_ai_content(&mut self, id: &str, content: AiContent) -> Outcome<Video> {
        self.modify(id, Action::AttachCopy, |v| {
            v.ai_content = Some(content);
            Ok(())
        })
    }

    pub fn dashboard(&self, today: NaiveDate) -> Outcome<DashboardStats> {
        let user = self.user()?;
        let visible = self.visible()?;
        Ok(DashboardStats::compute(user, &visible, today))
    }

    /// Discard every change and restore the demo videos
    pub fn reset(&mut self) -> Result<()> {
        self.videos.reset()
    }

    /// Flush the video store
    pub fn save(&self) -> Result<()> {
        self.videos.save()
    }
}

fn ensure_schedulable(video: &Video) -> Outcome<()> {
    if video.status == VideoStatus::Approved {
        Ok(())
    } else {
        Err(WorkflowError::NotSchedulable {
            id: video.id.clone(),
            status: video.status,
        })
    }
}

impl UploadSink for Desk {
    fn on_upload(&mut self, video: Video) -> Outcome<Video> {
        let user = self.can_upload()?;
        log::info!("{} uploaded {} ({})", user.email, video.file_name, video.id);
        self.videos.insert(video.clone());
        Ok(video)
    }
}
