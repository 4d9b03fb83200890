pub mod batch;
pub mod draft;
pub mod r#trait;

pub use batch::{human_size, SkippedFile, UploadBatch};
pub use draft::{UploadDraft, UploadLimits, UploadMetadata};
pub use r#trait::UploadSink;
