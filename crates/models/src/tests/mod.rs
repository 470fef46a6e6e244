use std::path::PathBuf;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::connect_with_config;



/// Fresh migrated SQLite database in its own directory under `target/test-data`.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let dir = PathBuf::from("target/test-data").join(Uuid::new_v4().to_string());
    std::fs::create_dir_all(&dir)?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.join("models.db").display()),
        max_connections: 4,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
