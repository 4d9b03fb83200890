use crate::auth::directory;
use crate::error::WorkflowError;
use crate::models::User;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Holds the logged-in user, optionally mirrored to a JSON file
pub struct SessionStore {
    current: Option<User>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Session that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            current: None,
            path: None,
        }
    }

    /// Open a session mirrored to `path`, restoring any stored user.
    /// A stored user that is no longer in the directory is discarded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut current = None;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session: {}", path.display()))?;
            match serde_json::from_str::<User>(&content) {
                Ok(stored) => match directory::find_by_email(&stored.email) {
                    Some(user) => current = Some(user),
                    None => log::warn!("Discarding session for unknown user {}", stored.email),
                },
                Err(e) => log::warn!("Ignoring unreadable session {}: {}", path.display(), e),
            }
        }

        Ok(Self {
            current,
            path: Some(path),
        })
    }

    /// Authenticate and remember the user
    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let user = directory::authenticate(email, password)?;
        self.current = Some(user.clone());
        self.persist()?;
        log::info!("{} logged in as {}", user.email, user.role);
        Ok(user)
    }

    /// Forget the current user
    pub fn logout(&mut self) -> Result<Option<User>> {
        let previous = self.current.take();
        if let Some(path) = &self.path {
            if path.exists() {
                fs::remove_file(path)
                    .with_context(|| format!("Failed to remove session: {}", path.display()))?;
            }
        }
        Ok(previous)
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// The current user, or `NotAuthenticated`
    pub fn require(&self) -> std::result::Result<&User, WorkflowError> {
        self.current.as_ref().ok_or(WorkflowError::NotAuthenticated)
    }

    fn persist(&self) -> Result<()> {
        let (Some(path), Some(user)) = (&self.path, &self.current) else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(user)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write session: {}", path.display()))?;
        Ok(())
    }
}
