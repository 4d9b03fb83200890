pub mod auth;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod models;
pub mod store;
pub mod upload;
pub mod utils;
pub mod workflow;

pub use calendar::{CalendarView, Grouping, ViewMode, WeekStart};
pub use config::Config;
pub use error::WorkflowError;
pub use generator::{ContentGenerator, GeneratorRegistry};
pub use models::{AiContent, CalendarEvent, Role, User, Video, VideoStatus};
pub use store::{VideoRepository, VideoStore};
pub use workflow::Desk;
