pub mod json;
pub mod seed;
pub mod r#trait;

pub use json::VideoStore;
pub use r#trait::VideoRepository;
pub use seed::seed_videos;
