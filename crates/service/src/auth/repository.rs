use async_trait::async_trait;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError>;
    async fn find_user(&self, id: i32) -> Result<Option<AuthUser>, AuthError>;
    /// Fails with `AuthError::Conflict` when the username is already taken.
    async fn create_user(&self, username: &str, password_hash: String, is_admin: bool) -> Result<AuthUser, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<Vec<Credentials>>, // index + 1 == id
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
            let users = self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            Ok(users.iter().find(|c| c.user.username == username).cloned())
        }

        async fn find_user(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            Ok(users.iter().find(|c| c.user.id == id).map(|c| c.user.clone()))
        }

        async fn create_user(&self, username: &str, password_hash: String, is_admin: bool) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            if users.iter().any(|c| c.user.username == username) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: users.len() as i32 + 1, username: username.to_string(), is_admin };
            users.push(Credentials { user: user.clone(), password_hash });
            Ok(user)
        }
    }
}
