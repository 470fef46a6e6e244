use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::auth::domain::RegisterInput;
use service::auth::repo::seaorm::SeaOrmUserRepository;
use service::auth::session::SessionKeys;
use service::auth::AuthService;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "server", version, about = "House listings web service")]
struct Cli {
    /// Emit JSON log lines instead of the compact format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Create a user directly in the database, e.g. the first admin
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CREATE_USER_PASSWORD")]
        password: String,
        #[arg(long)]
        admin: bool,
    },
}

fn init_logging(json: bool) {
    // load .env first so RUST_LOG takes effect
    dotenv().ok();
    if json {
        common::utils::logging::init_logging_json();
    } else {
        common::utils::logging::init_logging_default();
    }
    info!(service = "server", event = "logger_init", "tracing subscriber initialized");
}

async fn migrate(cfg: &configs::AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(service = "server", event = "migrated", "migrations applied");
    Ok(())
}

async fn create_user(cfg: &configs::AppConfig, username: String, password: String, admin: bool) -> anyhow::Result<()> {
    let db = server::startup::connect(cfg).await?;
    let keys = SessionKeys::new(&cfg.auth.session_secret, chrono::Duration::hours(cfg.auth.session_ttl_hours));
    let auth = AuthService::new(Arc::new(SeaOrmUserRepository { db }), keys);
    let user = auth.register(RegisterInput { username, password, is_admin: admin }).await?;
    info!(service = "server", event = "user_created", user_id = user.id, username = %user.username, is_admin = user.is_admin, "user created");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(service = "server", event = "signal_error", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    // basic service context (nothing sensitive)
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "server",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "server", event = "config_invalid", error = %e, "configuration rejected");
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(async move {
        match cli.command.unwrap_or(Command::Serve) {
            Command::Serve => {
                info!(
                    service = "server",
                    event = "start",
                    %service_id,
                    pid,
                    version,
                    threads = cfg.server.worker_threads.unwrap_or_default(),
                    "server service starting"
                );
                server::run(cfg, shutdown_signal()).await
            }
            Command::Migrate => migrate(&cfg).await,
            Command::CreateUser { username, password, admin } => create_user(&cfg, username, password, admin).await,
        }
    });

    match result {
        Ok(()) => {
            info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "server", event = "run_failed", error = %e, "server exited with error");
            std::process::ExitCode::FAILURE
        }
    }
}
