#![cfg(test)]
use std::path::PathBuf;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

use crate::uploads::UploadStore;

/// Fresh migrated SQLite database; each test gets its own file.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let dir = scratch_dir("db")?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.join("service.db").display()),
        max_connections: 4,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Upload store over an empty temporary directory.
pub fn upload_store() -> Result<UploadStore, anyhow::Error> {
    Ok(UploadStore::new(scratch_dir("uploads")?, ["png", "jpg", "jpeg", "gif"]))
}

fn scratch_dir(kind: &str) -> Result<PathBuf, anyhow::Error> {
    let dir = PathBuf::from("target/test-data").join(format!("{kind}-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
