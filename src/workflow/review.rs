use crate::error::WorkflowError;
use crate::models::{Video, VideoStatus};

/// Allowed status moves:
/// in-progress → submitted → approved | rejected, rejected → submitted | in-progress
pub fn can_transition(from: VideoStatus, to: VideoStatus) -> bool {
    use VideoStatus::*;
    matches!(
        (from, to),
        (InProgress, Submitted)
            | (Submitted, Approved)
            | (Submitted, Rejected)
            | (Rejected, Submitted)
            | (Rejected, InProgress)
    )
}

fn transition(video: &mut Video, to: VideoStatus) -> Result<(), WorkflowError> {
    if !can_transition(video.status, to) {
        return Err(WorkflowError::InvalidTransition {
            from: video.status,
            to,
        });
    }
    log::debug!("{}: {} -> {}", video.id, video.status, to);
    video.status = to;
    Ok(())
}

/// Send a video for review. Feedback from an earlier rejection is cleared.
pub fn submit(video: &mut Video) -> Result<(), WorkflowError> {
    transition(video, VideoStatus::Submitted)?;
    video.feedback = None;
    Ok(())
}

pub fn approve(video: &mut Video, feedback: Option<&str>) -> Result<(), WorkflowError> {
    transition(video, VideoStatus::Approved)?;
    video.feedback = feedback
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string);
    Ok(())
}

/// Reject a submitted video; feedback is mandatory
pub fn reject(video: &mut Video, feedback: &str) -> Result<(), WorkflowError> {
    let feedback = feedback.trim();
    if feedback.is_empty() {
        return Err(WorkflowError::FeedbackRequired);
    }
    transition(video, VideoStatus::Rejected)?;
    video.feedback = Some(feedback.to_string());
    Ok(())
}

/// Take a rejected video back into progress, keeping the reviewer's notes
pub fn rework(video: &mut Video) -> Result<(), WorkflowError> {
    transition(video, VideoStatus::InProgress)
}
