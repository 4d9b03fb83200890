use crate::models::{Role, User, Video, VideoStatus};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One scheduled publish of a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingRelease {
    pub date: NaiveDate,
    pub video_id: String,
    pub title: String,
}

/// Summary of the videos a user can see
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub role: Role,
    pub total: usize,
    pub by_status: BTreeMap<VideoStatus, usize>,
    /// Submitted videos this user is expected to review
    pub awaiting_review: usize,
    /// Rejected videos this user is expected to fix
    pub needs_changes: usize,
    /// Publishes on or after the reference day, soonest first
    pub upcoming: Vec<UpcomingRelease>,
    /// Approved videos without a publish date
    pub unscheduled: Vec<String>,
}

impl DashboardStats {
    pub fn compute(user: &User, videos: &[&Video], today: NaiveDate) -> Self {
        let mut by_status: BTreeMap<VideoStatus, usize> =
            VideoStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for video in videos {
            *by_status.entry(video.status).or_insert(0) += 1;
        }

        let count = |status: VideoStatus| by_status.get(&status).copied().unwrap_or(0);
        let (awaiting_review, needs_changes) = match user.role {
            Role::Admin => (count(VideoStatus::Submitted), count(VideoStatus::Rejected)),
            Role::Client => (count(VideoStatus::Submitted), 0),
            Role::Freelancer => (0, count(VideoStatus::Rejected)),
        };

        let mut upcoming: Vec<UpcomingRelease> = videos
            .iter()
            .flat_map(|video| {
                video
                    .publish_dates
                    .iter()
                    .filter(|date| **date >= today)
                    .map(move |date| UpcomingRelease {
                        date: *date,
                        video_id: video.id.clone(),
                        title: video.title.clone(),
                    })
            })
            .collect();
        upcoming.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));

        let unscheduled = videos
            .iter()
            .filter(|v| v.status == VideoStatus::Approved && !v.is_scheduled())
            .map(|v| v.id.clone())
            .collect();

        Self {
            role: user.role,
            total: videos.len(),
            by_status,
            awaiting_review,
            needs_changes,
            upcoming,
            unscheduled,
        }
    }

    pub fn count(&self, status: VideoStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::find_by_email;
    use crate::store::seed_videos;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    #[test]
    fn test_admin_dashboard_over_seed() {
        let videos = seed_videos(anchor());
        let refs: Vec<&Video> = videos.iter().collect();
        let admin = find_by_email("admin@clipdesk.dev").unwrap();

        let stats = DashboardStats::compute(&admin, &refs, anchor());
        assert_eq!(stats.total, 8);
        assert_eq!(stats.count(VideoStatus::Approved), 5);
        assert_eq!(stats.awaiting_review, 1);
        assert_eq!(stats.needs_changes, 1);
        assert_eq!(stats.unscheduled, vec!["vid-008".to_string()]);

        // vid-001, vid-002, vid-004 on day 2, vid-004 on day 5, vid-003 on day 9
        assert_eq!(stats.upcoming.len(), 5);
        assert!(stats.upcoming.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_freelancer_sees_only_fix_work() {
        let videos = seed_videos(anchor());
        let refs: Vec<&Video> = videos.iter().collect();
        let freelancer = find_by_email("freelancer@clipdesk.dev").unwrap();

        let stats = DashboardStats::compute(&freelancer, &refs, anchor());
        assert_eq!(stats.awaiting_review, 0);
        assert_eq!(stats.needs_changes, 1);
    }

    #[test]
    fn test_past_dates_are_not_upcoming() {
        let videos = seed_videos(anchor());
        let refs: Vec<&Video> = videos.iter().collect();
        let client = find_by_email("client@clipdesk.dev").unwrap();

        let later = anchor() + chrono::Duration::days(6);
        let stats = DashboardStats::compute(&client, &refs, later);
        assert_eq!(stats.upcoming.len(), 1);
        assert_eq!(stats.upcoming[0].video_id, "vid-003");
    }

    #[test]
    fn test_empty_dashboard() {
        let client = find_by_email("client@clipdesk.dev").unwrap();
        let stats = DashboardStats::compute(&client, &[], anchor());
        assert_eq!(stats.total, 0);
        assert!(VideoStatus::ALL.iter().all(|s| stats.count(*s) == 0));
    }
}
