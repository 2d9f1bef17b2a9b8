/// Chorus Server - music catalogue and playlist backend
use chorus_server::{
    config::ServerConfig,
    create_router,
    services::{AuthService, FileStorage, UserService},
    state::AppState,
};
use chorus_storage::Database;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chorus-server")]
#[command(about = "Chorus albums, songs and playlists server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CHORUS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Full name
        #[arg(short, long)]
        fullname: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chorus_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            username,
            password,
            fullname,
        } => {
            add_user(config, &username, &password, &fullname).await?;
        }
        Commands::ListUsers => {
            list_users(config).await?;
        }
    }

    Ok(())
}

fn auth_service(config: &ServerConfig) -> Arc<AuthService> {
    Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Chorus Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = Arc::new(Database::connect(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    // Initialize file storage
    let file_storage = FileStorage::new(
        config.storage.uploads_path.clone(),
        config.uploads.max_image_bytes,
    );
    file_storage.initialize().await?;
    let file_storage = Arc::new(file_storage);
    tracing::info!("File storage initialized");

    // Initialize aggregate cache
    let cache = config.cache.build();
    tracing::info!(
        enabled = config.cache.enabled,
        capacity = config.cache.capacity,
        ttl_seconds = config.cache.ttl_seconds,
        "Aggregate cache initialized"
    );

    // Build application state
    let app_state = AppState::new(
        db,
        cache,
        auth_service(&config),
        file_storage,
        config.server.public_url.clone(),
    );

    // Build router
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: ServerConfig,
    username: &str,
    password: &str,
    fullname: &str,
) -> anyhow::Result<()> {
    let db = Arc::new(Database::connect(&config.storage.database_url).await?);
    let users = UserService::new(db, auth_service(&config));

    let user_id = users.register(username, password, fullname).await?;
    println!("Created user {} ({})", username, user_id);

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let db = Arc::new(Database::connect(&config.storage.database_url).await?);
    let users = UserService::new(db, auth_service(&config));

    println!("Users:");
    for user in users.list_users().await? {
        println!("  {} - {} ({})", user.id, user.username, user.fullname);
    }

    Ok(())
}
