use crate::models::{AiContent, Video, VideoStatus};
use chrono::{Duration, NaiveDate};

/// Demo videos spread around `anchor`, covering every status and a couple
/// of multi-part series that share publish days.
pub fn seed_videos(anchor: NaiveDate) -> Vec<Video> {
    let day = |offset: i64| anchor + Duration::days(offset);
    let client = "u-2";
    let freelancer = "u-3";

    let remodel_copy = AiContent {
        hook: "Day one: every wall comes down.".to_string(),
        caption: "Demo day on the kitchen remodel. Swipe to see the before shots.".to_string(),
        cta: "Follow along for the full reveal".to_string(),
        email_copy: "This week we swung the first hammer on the kitchen remodel. Here is how demo day went."
            .to_string(),
    };

    let launch_copy = AiContent {
        hook: "Something new is coming this spring.".to_string(),
        caption: "A first look at what we have been building all winter.".to_string(),
        cta: "Join the waitlist today".to_string(),
        email_copy: "You are on the list. Here is an early peek at the spring launch before anyone else."
            .to_string(),
    };

    let mut demo_day = Video::new(
        "vid-001",
        "Kitchen Remodel - Demo Day",
        freelancer,
        client,
        day(-6),
        "kitchen-demo-day.mp4",
    )
    .with_status(VideoStatus::Approved)
    .with_publish_dates(vec![day(2)]);
    demo_day.description = "Tearing out the old kitchen down to the studs.".to_string();
    demo_day.file_size = 184_320_000;
    demo_day.tags = vec!["remodel".to_string(), "kitchen".to_string()];
    demo_day.ai_content = Some(remodel_copy);

    let mut cabinets = Video::new(
        "vid-002",
        "Kitchen Remodel - Cabinet Install",
        freelancer,
        client,
        day(-5),
        "kitchen-cabinets.mp4",
    )
    .with_status(VideoStatus::Approved)
    .with_publish_dates(vec![day(2)]);
    cabinets.description = "Hanging the new shaker cabinets.".to_string();
    cabinets.file_size = 210_500_000;
    cabinets.tags = vec!["remodel".to_string(), "kitchen".to_string()];

    let mut reveal = Video::new(
        "vid-003",
        "Kitchen Remodel: Final Reveal",
        freelancer,
        client,
        day(-3),
        "kitchen-reveal.mp4",
    )
    .with_status(VideoStatus::Approved)
    .with_publish_dates(vec![day(9)]);
    reveal.description = "The finished kitchen, start to end.".to_string();
    reveal.file_size = 256_000_000;
    reveal.tags = vec!["remodel".to_string(), "reveal".to_string()];

    let mut teaser = Video::new(
        "vid-004",
        "Spring Product Launch Teaser",
        freelancer,
        client,
        day(-4),
        "spring-teaser.mov",
    )
    .with_status(VideoStatus::Approved)
    .with_publish_dates(vec![day(2), day(5)]);
    teaser.description = "Fifteen second teaser for the spring line.".to_string();
    teaser.file_size = 48_000_000;
    teaser.tags = vec!["launch".to_string()];
    teaser.ai_content = Some(launch_copy);

    let mut story_one = Video::new(
        "vid-005",
        "Customer Story Ep 1",
        freelancer,
        client,
        day(-1),
        "customer-story-1.mp4",
    )
    .with_status(VideoStatus::Submitted);
    story_one.description = "Interview with our first wholesale customer.".to_string();
    story_one.file_size = 320_000_000;
    story_one.tags = vec!["testimonial".to_string()];

    let mut story_two = Video::new(
        "vid-006",
        "Customer Story Ep 2",
        freelancer,
        client,
        day(-2),
        "customer-story-2.mp4",
    )
    .with_status(VideoStatus::Rejected);
    story_two.description = "Follow-up interview, six months later.".to_string();
    story_two.file_size = 298_000_000;
    story_two.feedback = Some("Audio drops out around 0:42, please re-export with the lav track.".to_string());

    let mut tour = Video::new(
        "vid-007",
        "Office Tour",
        freelancer,
        client,
        day(0),
        "office-tour.mp4",
    );
    tour.description = "Walkthrough of the new studio space.".to_string();

    let mut qa = Video::new(
        "vid-008",
        "Founder Q&A | Pricing",
        freelancer,
        client,
        day(-8),
        "founder-qa-pricing.mp4",
    )
    .with_status(VideoStatus::Approved);
    qa.description = "Answering the most common pricing questions.".to_string();
    qa.file_size = 150_000_000;

    vec![demo_day, cabinets, reveal, teaser, story_one, story_two, tour, qa]
}
