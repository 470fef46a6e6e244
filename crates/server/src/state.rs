use std::sync::Arc;

use configs::AppConfig;
use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmUserRepository;
use service::auth::session::SessionKeys;
use service::auth::AuthService;
use service::listing::repo::seaorm::SeaOrmHouseRepository;
use service::listing::ListingService;
use service::uploads::UploadStore;

/// Shared handler state; everything here is fixed at startup.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<SeaOrmUserRepository>>,
    pub listings: Arc<ListingService<SeaOrmHouseRepository>>,
    pub cookie_name: String,
    pub allow_admin_signup: bool,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        let keys = SessionKeys::new(&cfg.auth.session_secret, chrono::Duration::hours(cfg.auth.session_ttl_hours));
        let auth = AuthService::new(Arc::new(SeaOrmUserRepository { db: db.clone() }), keys);
        let listings = ListingService::new(
            Arc::new(SeaOrmHouseRepository { db }),
            UploadStore::from_config(&cfg.uploads),
        );
        Self {
            auth: Arc::new(auth),
            listings: Arc::new(listings),
            cookie_name: cfg.auth.cookie_name.clone(),
            allow_admin_signup: cfg.auth.allow_admin_signup,
        }
    }
}
