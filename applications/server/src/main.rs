/// Cadence Server - music streaming web backend
use anyhow::Context;
use cadence_core::{CreateUser, Role};
use cadence_server::{
    config::ServerConfig,
    create_router,
    services::{AuthService, MediaStorage},
    state::AppState,
};
use cadence_storage::Database;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence-server")]
#[command(about = "Cadence music streaming server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create an admin account
    AddAdmin {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_server=info,cadence_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddAdmin {
            name,
            email,
            password,
        } => add_admin(&config, name, email, &password).await?,
        Commands::ListUsers => list_users(&config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Cadence Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db = Arc::new(open_database(&config).await?);
    tracing::info!("Database connected");

    let media_storage = MediaStorage::new(config.storage.media_path.clone());
    media_storage.initialize().await?;
    let media_storage = Arc::new(media_storage);
    tracing::info!("Media storage initialized at {}", config.storage.media_path.display());

    let auth_service = Arc::new(auth_service(&config));

    let app_state = AppState::new(db, auth_service, media_storage);
    let app = create_router(app_state, &config.storage);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
    .with_secure_cookies(config.auth.secure_cookies)
}

async fn open_database(config: &ServerConfig) -> anyhow::Result<Database> {
    ensure_sqlite_parent_dir(&config.storage.database_url).await?;
    Database::connect(&config.storage.database_url)
        .await
        .with_context(|| format!("opening {}", config.storage.database_url))
}

/// SQLite creates the file but not its directory
async fn ensure_sqlite_parent_dir(database_url: &str) -> anyhow::Result<()> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .map(|rest| rest.split('?').next().unwrap_or(rest));

    if let Some(parent) = path
        .filter(|p| !p.is_empty() && *p != ":memory:")
        .and_then(|p| std::path::Path::new(p).parent())
        .filter(|p| !p.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    Ok(())
}

async fn add_admin(
    config: &ServerConfig,
    name: String,
    email: String,
    password: &str,
) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let password_hash = auth_service(config).hash_password(password)?;

    let admin = cadence_storage::users::create(
        db.pool(),
        CreateUser {
            name,
            email,
            password_hash,
            role: Role::Admin,
        },
    )
    .await?;

    println!("Created admin {} <{}> ({})", admin.name, admin.email, admin.id);

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let users = cadence_storage::users::get_all(db.pool()).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}> [{}]", user.id, user.name, user.email, user.role);
    }

    Ok(())
}
