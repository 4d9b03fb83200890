use crate::error::WorkflowError;
use crate::models::{User, Video};
use crate::upload::{UploadDraft, UploadLimits, UploadMetadata, UploadSink};
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file left out of a batch, with the reason
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Files staged together for one upload
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    pub drafts: Vec<UploadDraft>,
    pub skipped: Vec<SkippedFile>,
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage files and directories (walked recursively). Files that cannot be
    /// staged, or whose content matches an existing video or an earlier file
    /// in the batch, are recorded as skipped.
    pub fn collect(paths: &[PathBuf], limits: &UploadLimits, existing_hashes: &HashSet<String>) -> Result<Self> {
        let mut batch = Self::new();
        let mut seen = existing_hashes.clone();

        for path in paths {
            for file in expand(path)? {
                batch.stage(file, limits, &mut seen);
            }
        }

        Ok(batch)
    }

    fn stage(&mut self, path: PathBuf, limits: &UploadLimits, seen: &mut HashSet<String>) {
        match UploadDraft::from_path(&path, limits) {
            Ok(draft) => {
                if seen.insert(draft.content_hash.clone()) {
                    self.drafts.push(draft);
                } else {
                    log::warn!("Skipping duplicate upload {}", path.display());
                    self.skipped.push(SkippedFile {
                        path,
                        reason: "duplicate content".to_string(),
                    });
                }
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                self.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.drafts.iter().map(|d| d.size).sum()
    }

    /// Generate a listing of what would be uploaded
    pub fn preview(&self) -> String {
        let mut output = String::new();
        output.push_str("Staged uploads:\n");

        for draft in &self.drafts {
            output.push_str(&format!(
                "  🎬 {} ({}) from {}\n",
                draft.title,
                human_size(draft.size),
                draft.path.display()
            ));
        }

        if !self.skipped.is_empty() {
            output.push_str("Skipped:\n");
            for skipped in &self.skipped {
                output.push_str(&format!("  ⚠️  {} ({})\n", skipped.path.display(), skipped.reason));
            }
        }

        output.push_str(&format!(
            "\nUpload {} videos, {} total? [y/N]:",
            self.drafts.len(),
            human_size(self.total_bytes())
        ));

        output
    }

    /// Hand every staged file to `sink` as a new video
    pub fn commit<S: UploadSink>(
        self,
        sink: &mut S,
        uploader: &User,
        metadata: &UploadMetadata,
        today: NaiveDate,
    ) -> std::result::Result<Vec<Video>, WorkflowError> {
        let single = self.drafts.len() == 1;
        let mut uploaded = Vec::with_capacity(self.drafts.len());

        for mut draft in self.drafts {
            if single {
                if let Some(title) = metadata.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                    draft.title = title.to_string();
                }
            }
            let video = draft.into_video(uploader, metadata, today);
            uploaded.push(sink.on_upload(video)?);
        }

        Ok(uploaded)
    }
}

fn expand(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::find_by_email;
    use crate::models::VideoStatus;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Collector {
        videos: Vec<Video>,
    }

    impl UploadSink for Collector {
        fn on_upload(&mut self, video: Video) -> std::result::Result<Video, WorkflowError> {
            self.videos.push(video.clone());
            Ok(video)
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    #[test]
    fn test_collect_walks_directories_and_skips() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("day1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("a-roll.mp4"), b"a roll").unwrap();
        fs::write(nested.join("b-roll.mov"), b"b roll").unwrap();
        fs::write(nested.join("copy-of-a.mp4"), b"a roll").unwrap();
        fs::write(nested.join("script.txt"), b"lines").unwrap();

        let batch = UploadBatch::collect(
            &[temp_dir.path().to_path_buf()],
            &UploadLimits::default(),
            &HashSet::new(),
        )
        .unwrap();

        assert_eq!(batch.drafts.len(), 2);
        assert_eq!(batch.skipped.len(), 2);
        assert!(batch.skipped.iter().any(|s| s.reason == "duplicate content"));
    }

    #[test]
    fn test_collect_skips_known_hashes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clip.mp4");
        fs::write(&path, b"already uploaded").unwrap();
        let hash = crate::utils::compute_file_hash(&path).unwrap();

        let existing: HashSet<String> = [hash].into_iter().collect();
        let batch = UploadBatch::collect(&[path], &UploadLimits::default(), &existing).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.skipped.len(), 1);
    }

    #[test]
    fn test_preview_lists_drafts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("office_tour.mp4");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let batch = UploadBatch::collect(&[path], &UploadLimits::default(), &HashSet::new()).unwrap();
        let preview = batch.preview();
        assert!(preview.contains("Office Tour"));
        assert!(preview.contains("2.0 KB"));
        assert!(preview.contains("Upload 1 videos"));
    }

    #[test]
    fn test_commit_single_file_uses_title_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("raw.mp4");
        fs::write(&path, b"raw").unwrap();

        let batch = UploadBatch::collect(&[path], &UploadLimits::default(), &HashSet::new()).unwrap();
        let uploader = find_by_email("freelancer@clipdesk.dev").unwrap();
        let mut metadata = UploadMetadata::for_client("u-2");
        metadata.title = Some("Launch Teaser v2".to_string());

        let mut sink = Collector::default();
        let videos = batch.commit(&mut sink, &uploader, &metadata, today()).unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(sink.videos[0].title, "Launch Teaser v2");
        assert_eq!(sink.videos[0].status, VideoStatus::Submitted);
    }

    #[test]
    fn test_commit_many_files_keeps_file_titles() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("one.mp4"), b"1").unwrap();
        fs::write(temp_dir.path().join("two.mp4"), b"2").unwrap();

        let batch = UploadBatch::collect(
            &[temp_dir.path().to_path_buf()],
            &UploadLimits::default(),
            &HashSet::new(),
        )
        .unwrap();
        let uploader = find_by_email("admin@clipdesk.dev").unwrap();
        let mut metadata = UploadMetadata::for_client("u-2");
        metadata.title = Some("Ignored".to_string());

        let mut sink = Collector::default();
        let videos = batch.commit(&mut sink, &uploader, &metadata, today()).unwrap();
        let titles: Vec<_> = videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
