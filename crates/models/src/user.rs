use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    /// argon2 PHC string
    #[serde(skip_serializing)]
    pub password: String,
    pub is_admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const USERNAME_MAX_LEN: usize = 80;

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if username.trim().is_empty() {
        return Err(ModelError::Validation("username required".into()));
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(ModelError::Validation(format!("username longer than {USERNAME_MAX_LEN} characters")));
    }
    Ok(())
}

/// Insert a user row. `password_hash` must already be hashed.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password_hash: String,
    is_admin: bool,
) -> Result<Model, ModelError> {
    validate_username(username)?;
    if password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        username: Set(username.to_string()),
        password: Set(password_hash),
        is_admin: Set(is_admin),
        ..Default::default()
    };
    am.insert(db).await.map_err(ModelError::db)
}

/// Exact, case-sensitive username lookup.
pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await
        .map_err(ModelError::db)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(ModelError::db)
}

/// Heuristic used to turn a store-level unique violation into a structured conflict.
pub fn is_unique_violation(err: &ModelError) -> bool {
    match err {
        ModelError::Db(msg) => {
            let lower = msg.to_lowercase();
            lower.contains("unique") || lower.contains("duplicate key")
        }
        ModelError::Validation(_) => false,
    }
}
