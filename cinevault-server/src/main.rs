//! # CineVault Server
//!
//! Entry point: parses the command line, loads configuration, connects to
//! PostgreSQL, applies the embedded migrations and serves the API.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use cinevault_config::{Config, ConfigLoad, ConfigLoader};
use cinevault_core::{
    crypto::PasswordCrypto,
    database::{PoolOptions, PostgresDatabase},
};
use cinevault_server::{AppState, create_app};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cinevault-server")]
#[command(about = "Versioned REST API for the CineVault movie-review catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Db(DbCommand::Migrate)) = cli.command {
        return run_db_migrate(&cli.serve).await;
    }

    run_server(cli.serve).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                // Override via RUST_LOG.
                |_| "info,tower_http=warn,sqlx=warn".into(),
            ),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

struct ConfigBootstrap {
    config: Arc<Config>,
    database_url: String,
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<ConfigBootstrap> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    init_tracing();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    let Some(database_url) = config.database.primary_url.clone() else {
        error!("DATABASE_URL or DATABASE_HOST/DATABASE_NAME must be provided");
        anyhow::bail!("No PostgreSQL connection configuration found");
    };

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = config.server.port,
        "configuration in effect"
    );

    Ok(ConfigBootstrap {
        config: Arc::new(config),
        database_url,
    })
}

async fn connect_database(
    config: &Config,
    database_url: &str,
) -> anyhow::Result<PostgresDatabase> {
    let options = PoolOptions {
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..PoolOptions::default()
    };
    let postgres = PostgresDatabase::connect(database_url, options)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!("Successfully connected to PostgreSQL");
    Ok(postgres)
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let ConfigBootstrap {
        config,
        database_url,
    } = load_runtime_config(args)?;
    let postgres = connect_database(&config, &database_url).await?;
    postgres
        .initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let ConfigBootstrap {
        config,
        database_url,
    } = load_runtime_config(&args)?;

    let postgres = Arc::new(connect_database(&config, &database_url).await?);
    postgres
        .initialize_schema()
        .await
        .context("database migration failed")?;

    let password_crypto = Arc::new(
        PasswordCrypto::new(config.auth.password_pepper.as_bytes())
            .context("failed to initialize password hashing")?,
    );

    let state = AppState::from_postgres(postgres, Arc::clone(&config), password_crypto);
    let router = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    info!(
        environment = %config.environment,
        "Starting CineVault API on {}", addr
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    info!("CineVault API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
