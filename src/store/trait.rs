use crate::models::Video;
use anyhow::Result;

/// Storage for the desk's videos
pub trait VideoRepository: Send + Sync {
    /// Every stored video, in insertion order
    fn all(&self) -> &[Video];

    fn get(&self, id: &str) -> Option<&Video>;

    fn get_mut(&mut self, id: &str) -> Option<&mut Video>;

    /// Add a video, replacing any existing video with the same id
    fn insert(&mut self, video: Video);

    fn remove(&mut self, id: &str) -> Option<Video>;

    /// Replace every video with the demo set and flush
    fn reset(&mut self) -> Result<()>;

    /// Flush pending changes to the backing medium (no-op when in memory)
    fn save(&self) -> Result<()>;
}
