/// Fave Server - authenticated favourites backend
use clap::{Parser, Subcommand};
use fave_core::UserStore;
use fave_server::{
    config::ServerConfig,
    create_router,
    services::{CredentialService, RegisterUser, TokenService},
    state::AppState,
};
use fave_storage::SqliteUserStore;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fave-server")]
#[command(about = "Fave favourites backend", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
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
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fave_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser { username, password } => {
            add_user(config, username, password).await?;
        }
        Commands::ListUsers => {
            list_users(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Fave Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Token lifetime: {} minutes", config.auth.token_ttl_minutes);

    // Initialize database
    let store: Arc<dyn UserStore> =
        Arc::new(SqliteUserStore::connect(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    let tokens = Arc::new(TokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_minutes,
    ));

    // Build application state
    let app_state = AppState::new(store, tokens, config.auth.bcrypt_cost);

    // Build router
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("API listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn add_user(config: ServerConfig, username: String, password: String) -> anyhow::Result<()> {
    let store: Arc<dyn UserStore> =
        Arc::new(SqliteUserStore::connect(&config.storage.database_url).await?);
    let credentials = CredentialService::new(store, config.auth.bcrypt_cost);

    let message = credentials
        .register_user(RegisterUser {
            username,
            password,
            password2: None,
        })
        .await?;

    println!("{}", message);
    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let store = SqliteUserStore::connect(&config.storage.database_url).await?;

    let users = store.list_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.id, user.username);
    }

    Ok(())
}
