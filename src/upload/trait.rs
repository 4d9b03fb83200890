use crate::error::WorkflowError;
use crate::models::Video;

/// Receives finished uploads
pub trait UploadSink {
    /// Accept a new video, returning it as stored
    fn on_upload(&mut self, video: Video) -> Result<Video, WorkflowError>;
}
