use crate::error::WorkflowError;
use crate::models::{Role, User, Video};

/// Things a user can try to do to a video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Upload,
    Submit,
    Rework,
    Review,
    Schedule,
    AttachCopy,
}

impl Action {
    pub fn describe(&self) -> &'static str {
        match self {
            Action::Upload => "upload videos",
            Action::Submit => "submit this video",
            Action::Rework => "rework this video",
            Action::Review => "review this video",
            Action::Schedule => "schedule this video",
            Action::AttachCopy => "edit this video's copy",
        }
    }
}

/// Admins see everything, clients their own videos, freelancers what
/// they uploaded
pub fn can_view(user: &User, video: &Video) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Client => video.client_id == user.id,
        Role::Freelancer => video.uploaded_by == user.id,
    }
}

fn allowed(user: &User, action: Action, video: Option<&Video>) -> bool {
    if user.role == Role::Admin {
        return true;
    }
    let owns = |check: fn(&User, &Video) -> bool| video.is_some_and(|v| check(user, v));

    match (action, user.role) {
        (Action::Upload, Role::Freelancer) => true,
        (Action::Submit | Action::Rework, Role::Freelancer) => owns(|u, v| v.uploaded_by == u.id),
        (Action::Review | Action::Schedule, Role::Client) => owns(|u, v| v.client_id == u.id),
        (Action::AttachCopy, _) => owns(can_view),
        _ => false,
    }
}

/// `Forbidden` unless `user` may perform `action` (on `video`, when given)
pub fn authorize(user: &User, action: Action, video: Option<&Video>) -> Result<(), WorkflowError> {
    if allowed(user, action, video) {
        Ok(())
    } else {
        Err(WorkflowError::Forbidden {
            role: user.role,
            action: action.describe(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::find_by_email;
    use chrono::NaiveDate;

    fn user(email: &str) -> User {
        find_by_email(email).unwrap()
    }

    fn video() -> Video {
        let day = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        Video::new("vid-1", "Teaser", "u-3", "u-2", day, "teaser.mp4")
    }

    #[test]
    fn test_visibility() {
        let video = video();
        assert!(can_view(&user("admin@clipdesk.dev"), &video));
        assert!(can_view(&user("client@clipdesk.dev"), &video));
        assert!(can_view(&user("freelancer@clipdesk.dev"), &video));

        let mut foreign = video.clone();
        foreign.client_id = "u-99".to_string();
        foreign.uploaded_by = "u-98".to_string();
        assert!(!can_view(&user("client@clipdesk.dev"), &foreign));
        assert!(!can_view(&user("freelancer@clipdesk.dev"), &foreign));
    }

    #[test]
    fn test_client_cannot_upload() {
        let err = authorize(&user("client@clipdesk.dev"), Action::Upload, None).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::Forbidden {
                role: Role::Client,
                action: "upload videos"
            }
        );
    }

    #[test]
    fn test_freelancer_cannot_review() {
        let video = video();
        let freelancer = user("freelancer@clipdesk.dev");
        assert!(authorize(&freelancer, Action::Review, Some(&video)).is_err());
        assert!(authorize(&freelancer, Action::Schedule, Some(&video)).is_err());
        assert!(authorize(&freelancer, Action::Submit, Some(&video)).is_ok());
    }

    #[test]
    fn test_client_reviews_only_own_videos() {
        let client = user("client@clipdesk.dev");
        let mut video = video();
        assert!(authorize(&client, Action::Review, Some(&video)).is_ok());
        video.client_id = "u-99".to_string();
        assert!(authorize(&client, Action::Review, Some(&video)).is_err());
    }

    #[test]
    fn test_admin_can_do_everything() {
        let admin = user("admin@clipdesk.dev");
        let video = video();
        for action in [
            Action::Upload,
            Action::Submit,
            Action::Rework,
            Action::Review,
            Action::Schedule,
            Action::AttachCopy,
        ] {
            assert!(authorize(&admin, action, Some(&video)).is_ok());
        }
    }

    #[test]
    fn test_video_actions_need_a_video() {
        let client = user("client@clipdesk.dev");
        assert!(authorize(&client, Action::Review, None).is_err());
    }
}
