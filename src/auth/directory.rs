use crate::constants::DIRECTORY;
use crate::error::WorkflowError;
use crate::models::{Role, User};

fn parse_role(role: &str) -> Role {
    match role {
        "admin" => Role::Admin,
        "client" => Role::Client,
        _ => Role::Freelancer,
    }
}

/// All desk accounts
pub fn users() -> Vec<User> {
    DIRECTORY
        .iter()
        .map(|(id, name, email, role)| User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: parse_role(role),
            avatar: None,
        })
        .collect()
}

/// Look up an account by email (trimmed, case-insensitive)
pub fn find_by_email(email: &str) -> Option<User> {
    let needle = email.trim().to_lowercase();
    users().into_iter().find(|u| u.email == needle)
}

pub fn find_by_id(id: &str) -> Option<User> {
    users().into_iter().find(|u| u.id == id)
}

/// Resolve credentials against the directory.
/// Any non-empty password is accepted for a known email.
pub fn authenticate(email: &str, password: &str) -> Result<User, WorkflowError> {
    let user = find_by_email(email)
        .ok_or_else(|| WorkflowError::UnknownUser(email.trim().to_string()))?;

    if password.trim().is_empty() {
        return Err(WorkflowError::InvalidCredentials);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_has_one_user_per_role() {
        let users = users();
        assert_eq!(users.len(), 3);
        for role in [Role::Admin, Role::Client, Role::Freelancer] {
            assert_eq!(users.iter().filter(|u| u.role == role).count(), 1);
        }
    }

    #[test]
    fn test_find_by_email_is_case_insensitive() {
        let user = find_by_email("  Client@ClipDesk.dev ").unwrap();
        assert_eq!(user.role, Role::Client);
    }

    #[test]
    fn test_authenticate_unknown_email() {
        let err = authenticate("nobody@example.com", "secret").unwrap_err();
        assert_eq!(err, WorkflowError::UnknownUser("nobody@example.com".to_string()));
    }

    #[test]
    fn test_authenticate_empty_password() {
        let err = authenticate("admin@clipdesk.dev", "  ").unwrap_err();
        assert_eq!(err, WorkflowError::InvalidCredentials);
    }

    #[test]
    fn test_authenticate_success() {
        let user = authenticate("freelancer@clipdesk.dev", "hunter2").unwrap();
        assert_eq!(user.id, "u-3");
        assert_eq!(find_by_id("u-3"), Some(user));
    }
}
