use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::warn;

/// Development-only secret used when neither the config file nor `SESSION_SECRET` provide one.
pub const DEV_SESSION_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

/// Where uploaded listing images land and which suffixes are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            allowed_extensions: default_allowed_extensions(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub session_secret: String,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    /// When false, the public registration form cannot create admins.
    #[serde(default)]
    pub allow_admin_signup: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            cookie_name: default_cookie_name(),
            session_ttl_hours: default_session_ttl_hours(),
            allow_admin_signup: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_upload_dir() -> PathBuf { PathBuf::from("static/uploads") }
fn default_allowed_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "gif"].iter().map(|s| s.to_string()).collect()
}
fn default_max_request_bytes() -> usize { 16 * 1024 * 1024 }
fn default_cookie_name() -> String { "session".into() }
fn default_session_ttl_hours() -> i64 { 12 }

pub const DEFAULT_DATABASE_URL: &str = "sqlite://houses.db?mode=rwc";

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`); a missing file falls back to defaults plus env vars.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(error = %e, "config file not loaded; using defaults and environment");
                AppConfig::default()
            }
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.uploads.normalize();
        self.uploads.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            self.url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("sqlite:") || lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with sqlite:, postgres:// or postgresql://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl UploadConfig {
    /// Lowercase and strip leading dots so `".PNG"` and `"png"` mean the same thing.
    pub fn normalize(&mut self) {
        let mut exts: Vec<String> = self
            .allowed_extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        exts.dedup();
        self.allowed_extensions = exts;
    }

    pub fn validate(&self) -> Result<()> {
        if self.dir.as_os_str().is_empty() {
            return Err(anyhow!("uploads.dir must not be empty"));
        }
        if self.allowed_extensions.is_empty() {
            return Err(anyhow!("uploads.allowed_extensions must list at least one extension"));
        }
        if self.max_request_bytes == 0 {
            return Err(anyhow!("uploads.max_request_bytes must be positive"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.session_secret.trim().is_empty() {
            match std::env::var("SESSION_SECRET") {
                Ok(secret) if !secret.trim().is_empty() => self.session_secret = secret,
                _ => {
                    warn!("SESSION_SECRET not set; falling back to the development secret");
                    self.session_secret = DEV_SESSION_SECRET.to_string();
                }
            }
        }
        if self.cookie_name.trim().is_empty() {
            self.cookie_name = default_cookie_name();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.session_secret.trim().is_empty() {
            return Err(anyhow!("auth.session_secret must not be empty"));
        }
        if self.session_ttl_hours <= 0 {
            return Err(anyhow!("auth.session_ttl_hours must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "sqlite::memory:"

            [uploads]
            allowed_extensions = [".PNG", "jpg"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 10);
        assert!(cfg.database.auto_migrate);
        assert_eq!(cfg.uploads.dir, PathBuf::from("static/uploads"));
        assert_eq!(cfg.auth.cookie_name, "session");
        assert!(!cfg.auth.allow_admin_signup);
    }

    #[test]
    fn normalizes_extensions() {
        let mut up = UploadConfig { allowed_extensions: vec![".PNG".into(), " Jpg ".into(), "".into()], ..Default::default() };
        up.normalize();
        assert_eq!(up.allowed_extensions, vec!["png".to_string(), "jpg".to_string()]);
    }

    #[test]
    fn rejects_unknown_database_scheme() {
        let db = DatabaseConfig { url: "mysql://localhost/db".into(), ..Default::default() };
        assert!(db.validate().is_err());
        let db = DatabaseConfig { url: "sqlite://houses.db".into(), ..Default::default() };
        assert!(db.validate().is_ok());
    }

    #[test]
    fn rejects_bad_pool_bounds() {
        let db = DatabaseConfig { url: "postgres://u@h/db".into(), min_connections: 5, max_connections: 2, ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn empty_allow_list_is_invalid() {
        let up = UploadConfig { allowed_extensions: vec![], ..Default::default() };
        assert!(up.validate().is_err());
    }

    #[test]
    fn explicit_secret_is_kept() {
        let mut auth = AuthConfig { session_secret: "s3cret".into(), ..Default::default() };
        auth.normalize_from_env();
        assert_eq!(auth.session_secret, "s3cret");
        assert!(auth.validate().is_ok());
    }
}
