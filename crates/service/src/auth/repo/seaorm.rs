use sea_orm::DatabaseConnection;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::UserRepository;
use models::errors::ModelError;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

fn repo_err(e: ModelError) -> AuthError {
    AuthError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
        let found = models::user::find_by_username(&self.db, username).await.map_err(repo_err)?;
        Ok(found.map(|m| {
            let password_hash = m.password.clone();
            Credentials { user: m.into(), password_hash }
        }))
    }

    async fn find_user(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
        let found = models::user::find_by_id(&self.db, id).await.map_err(repo_err)?;
        Ok(found.map(AuthUser::from))
    }

    async fn create_user(&self, username: &str, password_hash: String, is_admin: bool) -> Result<AuthUser, AuthError> {
        match models::user::create(&self.db, username, password_hash, is_admin).await {
            Ok(created) => Ok(created.into()),
            // lost a race against another registration of the same name
            Err(e) if models::user::is_unique_violation(&e) => Err(AuthError::Conflict),
            Err(ModelError::Validation(msg)) => Err(AuthError::Validation(msg)),
            Err(e) => Err(repo_err(e)),
        }
    }
}
