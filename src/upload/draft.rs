use crate::config::UploadConfig;
use crate::error::WorkflowError;
use crate::models::{User, Video, VideoStatus};
use crate::utils;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// What the uploader accepts
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_size_mb: u64,
    pub allowed_extensions: Vec<String>,
}

impl UploadLimits {
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            max_size_mb: config.max_size_mb,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == ext)
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self::from_config(&UploadConfig::default())
    }
}

/// Details the uploader types in
#[derive(Debug, Clone)]
pub struct UploadMetadata {
    /// Title override; only used when a single file is uploaded
    pub title: Option<String>,
    pub description: String,
    pub client_id: String,
    pub tags: Vec<String>,
    /// Send straight to review instead of leaving the video in progress
    pub submit_for_review: bool,
}

impl UploadMetadata {
    pub fn for_client(client_id: impl Into<String>) -> Self {
        Self {
            title: None,
            description: String::new(),
            client_id: client_id.into(),
            tags: Vec::new(),
            submit_for_review: true,
        }
    }
}

/// A local file staged for upload
#[derive(Debug, Clone)]
pub struct UploadDraft {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub content_hash: String,
    pub preview_url: String,
    pub title: String,
}

impl UploadDraft {
    /// Stage a file, checking its type and size
    pub fn from_path<P: AsRef<Path>>(path: P, limits: &UploadLimits) -> Result<Self> {
        let path = path.as_ref();
        let extension = utils::get_extension(path).unwrap_or_default();
        if !limits.accepts_extension(&extension) {
            return Err(WorkflowError::UnsupportedFile(path.to_path_buf()).into());
        }

        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        if !metadata.is_file() {
            return Err(WorkflowError::UnsupportedFile(path.to_path_buf()).into());
        }

        let size = metadata.len();
        if size > limits.max_size_mb.saturating_mul(BYTES_PER_MB) {
            return Err(WorkflowError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: size.div_ceil(BYTES_PER_MB),
                limit_mb: limits.max_size_mb,
            }
            .into());
        }

        let absolute = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve path: {}", path.display()))?;
        let content_hash = utils::compute_file_hash(&absolute)?;
        let file_name = absolute
            .file_name()
            .and_then(|n| n.to_str())
            .context("Failed to get file name")?
            .to_string();

        Ok(Self {
            preview_url: format!("file://{}", absolute.display()),
            title: title_from_stem(&absolute),
            path: absolute,
            file_name,
            size,
            content_hash,
        })
    }

    /// Turn the staged file into a video owned by `uploader`
    pub fn into_video(self, uploader: &User, metadata: &UploadMetadata, today: NaiveDate) -> Video {
        let id = format!("vid-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
        let status = if metadata.submit_for_review {
            VideoStatus::Submitted
        } else {
            VideoStatus::InProgress
        };

        let mut video = Video::new(
            id,
            self.title,
            uploader.id.clone(),
            metadata.client_id.clone(),
            today,
            self.file_name,
        )
        .with_status(status);
        video.description = metadata.description.clone();
        video.file_size = self.size;
        video.preview_url = Some(self.preview_url);
        video.content_hash = Some(self.content_hash);
        video.tags = metadata.tags.clone();
        video
    }
}

/// "kitchen_demo-day" -> "Kitchen Demo Day"
fn title_from_stem(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled");
    let words: Vec<String> = stem
        .split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "Untitled".to_string()
    } else {
        words.join(" ")
    }
}
