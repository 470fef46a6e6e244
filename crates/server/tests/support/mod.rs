#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use configs::AppConfig;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub upload_dir: PathBuf,
}

/// App over a fresh SQLite file and an empty upload directory under `target/test-data`.
pub async fn test_app(allow_admin_signup: bool) -> anyhow::Result<TestApp> {
    let root = PathBuf::from("target/test-data").join(Uuid::new_v4().to_string());
    std::fs::create_dir_all(&root)?;

    let mut cfg = AppConfig::default();
    cfg.database.url = format!("sqlite://{}?mode=rwc", root.join("server.db").display());
    cfg.database.max_connections = 4;
    cfg.uploads.dir = root.join("uploads");
    cfg.auth.session_secret = "test-secret".into();
    cfg.auth.allow_admin_signup = allow_admin_signup;
    cfg.normalize_and_validate()?;

    service::runtime::ensure_env(&cfg.uploads).await?;
    let db = server::startup::connect(&cfg).await?;
    let router = server::startup::build_app(db, &cfg);
    Ok(TestApp { router, upload_dir: cfg.uploads.dir.clone() })
}

pub const BOUNDARY: &str = "----house-listings-test-boundary";

/// Hand-built multipart/form-data body: text fields, then `(field, filename, content)` file parts.
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes());
    }
    for (name, filename, content) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Value of the named cookie in the response's `Set-Cookie` headers.
pub fn set_cookie(res: &axum::response::Response, name: &str) -> Option<String> {
    res.headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().to_string())
}

pub fn location(res: &axum::response::Response) -> Option<String> {
    res.headers()
        .get(axum::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
