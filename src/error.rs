//! Error types for the content workflow
//!
//! Errors are grouped by the layer that raises them:
//! - Session: unknown users, bad credentials, missing login
//! - Workflow: permissions, status transitions, scheduling
//! - Content: uploads and generator templates

use crate::models::{Role, VideoStatus};
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    // Session
    #[error("No user registered with email '{0}'")]
    UnknownUser(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    // Workflow
    #[error("A {role} cannot {action}")]
    Forbidden { role: Role, action: &'static str },

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Cannot move a video from {from} to {to}")]
    InvalidTransition { from: VideoStatus, to: VideoStatus },

    #[error("Rejecting a video requires feedback")]
    FeedbackRequired,

    #[error("Video {id} is not scheduled on {date}")]
    NotScheduled { id: String, date: NaiveDate },

    #[error("Only approved videos can be scheduled ({id} is {status})")]
    NotSchedulable { id: String, status: VideoStatus },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    // Content
    #[error("Template placeholder '{{{{{0}}}}}' has no value")]
    MissingPlaceholder(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(PathBuf),

    #[error("{path} is {size_mb} MB, the limit is {limit_mb} MB")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        limit_mb: u64,
    },

    #[error("Variant {index} out of range ({count} available)")]
    VariantOutOfRange { index: usize, count: usize },

    #[error("Unknown generator '{0}'")]
    UnknownGenerator(String),
}

impl WorkflowError {
    /// Returns true if logging in again could resolve this error
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            WorkflowError::NotAuthenticated
                | WorkflowError::UnknownUser(_)
                | WorkflowError::InvalidCredentials
        )
    }
}
