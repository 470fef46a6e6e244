use std::sync::{Arc, OnceLock};

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::UserRepository;
use super::session::SessionKeys;

/// Auth business service independent of web framework
pub struct AuthService<R: UserRepository> {
    repo: Arc<R>,
    keys: SessionKeys,
    /// Stand-in hash verified for unknown usernames so both failures cost one argon2 run.
    dummy_hash: OnceLock<String>,
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

fn password_matches(hash: &str, password: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, keys: SessionKeys) -> Self { Self { repo, keys, dummy_hash: OnceLock::new() } }

    pub fn session_keys(&self) -> &SessionKeys { &self.keys }

    /// Register a new user with a salted argon2 hash of the password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::AuthService, repository::mock::MockUserRepository, session::SessionKeys};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockUserRepository::default());
    /// let svc = AuthService::new(repo, SessionKeys::new("secret", chrono::Duration::hours(1)));
    /// let input = RegisterInput { username: "bob".into(), password: "pw123".into(), is_admin: true };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "bob");
    /// assert!(user.is_admin);
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username, is_admin = input.is_admin))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if input.username.trim().is_empty() {
            return Err(AuthError::Validation("username required".into()));
        }
        if input.password.is_empty() {
            return Err(AuthError::Validation("password required".into()));
        }
        if self.repo.find_credentials(&input.username).await?.is_some() {
            debug!("username already taken");
            return Err(AuthError::Conflict);
        }

        let hash = hash_password(&input.password)?;
        let user = self.repo.create_user(&input.username, hash, input.is_admin).await?;
        info!(user_id = user.id, username = %user.username, is_admin = user.is_admin, "user_registered");
        Ok(user)
    }

    /// Verify credentials and issue a session token.
    ///
    /// Unknown usernames and wrong passwords both yield `AuthError::Unauthorized`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::AuthService, repository::mock::MockUserRepository, session::SessionKeys};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockUserRepository::default());
    /// let svc = AuthService::new(repo, SessionKeys::new("secret", chrono::Duration::hours(1)));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "alice".into(), password: "correct".into(), is_admin: false }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "alice".into(), password: "correct".into() })).unwrap();
    /// assert_eq!(session.user.username, "alice");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let Some(cred) = self.repo.find_credentials(&input.username).await? else {
            let dummy = self.dummy_hash()?;
            let _ = password_matches(dummy, &input.password)?;
            warn!("login_failed");
            return Err(AuthError::Unauthorized);
        };

        if !password_matches(&cred.password_hash, &input.password)? {
            warn!("login_failed");
            return Err(AuthError::Unauthorized);
        }

        let token = self.keys.issue(&cred.user)?;
        info!(user_id = cred.user.id, "login_succeeded");
        Ok(AuthSession { user: cred.user, token })
    }

    fn dummy_hash(&self) -> Result<&str, AuthError> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash);
        }
        let hash = hash_password("no-such-user")?;
        Ok(self.dummy_hash.get_or_init(|| hash))
    }

    /// Resolve a session token to the current user row.
    ///
    /// Invalid or expired tokens, and tokens for users that no longer exist,
    /// resolve to `None`.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<AuthUser>, AuthError> {
        let claims = match self.keys.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "session token rejected");
                return Ok(None);
            }
        };
        self.repo.find_user(claims.sub).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockUserRepository;

    fn service() -> AuthService<MockUserRepository> {
        AuthService::new(
            Arc::new(MockUserRepository::default()),
            SessionKeys::new("test-secret", chrono::Duration::hours(1)),
        )
    }

    fn register(username: &str, password: &str, is_admin: bool) -> RegisterInput {
        RegisterInput { username: username.into(), password: password.into(), is_admin }
    }

    fn login(username: &str, password: &str) -> LoginInput {
        LoginInput { username: username.into(), password: password.into() }
    }

    #[tokio::test]
    async fn password_is_stored_hashed() {
        let repo = Arc::new(MockUserRepository::default());
        let svc = AuthService::new(repo.clone(), SessionKeys::new("s", chrono::Duration::hours(1)));
        svc.register(register("alice", "correct", false)).await.unwrap();
        let cred = repo.find_credentials("alice").await.unwrap().unwrap();
        assert_ne!(cred.password_hash, "correct");
        assert!(cred.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let svc = service();
        svc.register(register("alice", "one", false)).await.unwrap();
        let err = svc.register(register("alice", "two", true)).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn blank_username_or_password_is_rejected() {
        let svc = service();
        assert!(matches!(svc.register(register(" ", "pw", false)).await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.register(register("dan", "", false)).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let svc = service();
        svc.register(register("alice", "correct", false)).await.unwrap();

        let wrong = svc.login(login("alice", "wrong")).await.unwrap_err();
        let unknown = svc.login(login("mallory", "correct")).await.unwrap_err();
        assert!(matches!(wrong, AuthError::Unauthorized));
        assert!(matches!(unknown, AuthError::Unauthorized));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn unknown_user_login_still_verifies_a_hash() {
        let svc = service();
        assert!(svc.dummy_hash.get().is_none());

        let err = svc.login(login("nobody", "guess")).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
        let dummy = svc.dummy_hash.get().expect("dummy hash computed").clone();
        assert!(dummy.starts_with("$argon2"));
        assert!(!password_matches(&dummy, "guess").unwrap());

        svc.login(login("nobody", "again")).await.unwrap_err();
        assert_eq!(svc.dummy_hash.get(), Some(&dummy));
    }

    #[tokio::test]
    async fn session_token_resolves_to_current_user() {
        let svc = service();
        let bob = svc.register(register("bob", "pw123", true)).await.unwrap();
        let session = svc.login(login("bob", "pw123")).await.unwrap();
        assert_eq!(session.user, bob);

        let resolved = svc.resolve_session(&session.token).await.unwrap();
        assert_eq!(resolved, Some(bob));
        assert_eq!(svc.resolve_session("bogus").await.unwrap(), None);
    }

    #[tokio::test]
    async fn token_for_missing_user_resolves_to_none() {
        let svc = service();
        let ghost = AuthUser { id: 99, username: "ghost".into(), is_admin: true };
        let token = svc.session_keys().issue(&ghost).unwrap();
        assert_eq!(svc.resolve_session(&token).await.unwrap(), None);
    }
}
