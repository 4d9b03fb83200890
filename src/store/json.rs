use crate::models::Video;
use crate::store::{seed_videos, VideoRepository};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory video list, optionally mirrored to a JSON file
pub struct VideoStore {
    videos: Vec<Video>,
    path: Option<PathBuf>,
    seed_anchor: NaiveDate,
}

impl VideoStore {
    /// Store that never touches disk, seeded with demo videos around `anchor`
    pub fn in_memory_seeded(anchor: NaiveDate) -> Self {
        Self {
            videos: seed_videos(anchor),
            path: None,
            seed_anchor: anchor,
        }
    }

    /// Open the JSON mirror at `path`, seeding it when it does not exist yet
    pub fn open<P: AsRef<Path>>(path: P, anchor: NaiveDate) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            log::info!("No video store at {}, seeding demo data", path.display());
            let store = Self {
                videos: seed_videos(anchor),
                path: Some(path),
                seed_anchor: anchor,
            };
            store.save()?;
            return Ok(store);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read video store: {}", path.display()))?;
        let mut videos: Vec<Video> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse video store: {}", path.display()))?;

        for video in &mut videos {
            video.publish_dates.sort();
            video.publish_dates.dedup();
        }
        log::debug!("Loaded {} videos from {}", videos.len(), path.display());

        Ok(Self {
            videos,
            path: Some(path),
            seed_anchor: anchor,
        })
    }
}

impl VideoRepository for VideoStore {
    fn all(&self) -> &[Video] {
        &self.videos
    }

    fn get(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Video> {
        self.videos.iter_mut().find(|v| v.id == id)
    }

    fn reset(&mut self) -> Result<()> {
        self.videos = seed_videos(self.seed_anchor);
        log::info!("Restored {} demo videos", self.videos.len());
        self.save()
    }

    fn insert(&mut self, video: Video) {
        match self.videos.iter_mut().find(|v| v.id == video.id) {
            Some(existing) => *existing = video,
            None => self.videos.push(video),
        }
    }

    fn remove(&mut self, id: &str) -> Option<Video> {
        let index = self.videos.iter().position(|v| v.id == id)?;
        Some(self.videos.remove(index))
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write a sibling file, then rename it over the store
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&self.videos)?;
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write video store: {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace video store: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoStatus;
    use tempfile::TempDir;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    #[test]
    fn test_open_seeds_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("videos.json");

        let store = VideoStore::open(&path, anchor()).unwrap();
        assert!(path.exists());
        assert_eq!(store.all().len(), seed_videos(anchor()).len());
    }

    #[test]
    fn test_changes_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("videos.json");

        let mut store = VideoStore::open(&path, anchor()).unwrap();
        store.get_mut("vid-005").unwrap().status = VideoStatus::Approved;
        store.remove("vid-007");
        store.save().unwrap();

        let reopened = VideoStore::open(&path, anchor()).unwrap();
        assert_eq!(reopened.get("vid-005").unwrap().status, VideoStatus::Approved);
        assert!(reopened.get("vid-007").is_none());
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut store = VideoStore::in_memory_seeded(anchor());
        let before = store.all().len();
        let mut video = store.get("vid-001").unwrap().clone();
        video.title = "Renamed".to_string();
        store.insert(video);

        assert_eq!(store.all().len(), before);
        assert_eq!(store.get("vid-001").unwrap().title, "Renamed");
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut store = VideoStore::in_memory_seeded(anchor());
        store.remove("vid-001");
        store.reset().unwrap();
        assert!(store.get("vid-001").is_some());
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("videos.json");
        std::fs::write(&path, "{ broken").unwrap();
        assert!(VideoStore::open(&path, anchor()).is_err());
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let mut store = VideoStore::in_memory_seeded(anchor());
        store.reset().unwrap();
        assert!(store.save().is_ok());
        assert_eq!(store.all().len(), seed_videos(anchor()).len());
    }
}
