pub mod directory;
pub mod session;

pub use directory::{authenticate, find_by_email, find_by_id, users};
pub use session::SessionStore;
