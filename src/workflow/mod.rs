pub mod dashboard;
pub mod desk;
pub mod permissions;
pub mod review;

pub use dashboard::{DashboardStats, UpcomingRelease};
pub use desk::Desk;
pub use permissions::{authorize, can_view, Action};
pub use review::{approve, can_transition, reject, rework, submit};
