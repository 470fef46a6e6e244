//! Authorization checks for listing mutations.

use thiserror::Error;

use super::domain::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No session identity was presented.
    #[error("authentication required")]
    Unauthenticated,
    /// A session exists but the user is not an admin.
    #[error("admin privileges required")]
    Forbidden,
}

/// Returns the caller when it is an authenticated admin.
pub fn require_admin(caller: Option<&AuthUser>) -> Result<&AuthUser, AccessError> {
    match caller {
        None => Err(AccessError::Unauthenticated),
        Some(user) if !user.is_admin => Err(AccessError::Forbidden),
        Some(user) => Ok(user),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> AuthUser {
        AuthUser { id: 7, username: "alice".into(), is_admin }
    }

    #[test]
    fn anonymous_and_non_admin_are_distinct() {
        assert_eq!(require_admin(None), Err(AccessError::Unauthenticated));
        let plain = user(false);
        assert_eq!(require_admin(Some(&plain)), Err(AccessError::Forbidden));
        let admin = user(true);
        assert_eq!(require_admin(Some(&admin)).map(|u| u.id), Ok(7));
    }
}
