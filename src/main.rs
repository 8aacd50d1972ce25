use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use school_api::config::{self, StorageBackend};
use school_api::database::{DatabaseManager, InMemoryStudentRepository, PgStudentRepository, StudentRepository};
use school_api::{app, AppState};

#[derive(Parser, Debug)]
#[command(name = "school-api", version, about = "Student records HTTP API")]
struct Args {
    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(long)]
    bind: Option<String>,

    /// PostgreSQL connection string
    #[arg(long)]
    database_url: Option<String>,

    /// Keep students in process memory instead of PostgreSQL
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Command line flags win over the environment
    let mut config = config::config().clone();
    if let Some(bind) = args.bind {
        config.api.bind_addr = bind;
    }
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }
    if args.memory {
        config.storage = StorageBackend::Memory;
    }

    info!("Starting school-api in {:?} mode", config.environment);

    let repository: Arc<dyn StudentRepository> = match config.storage {
        StorageBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to open database pool")?;
            Arc::new(PgStudentRepository::new(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; students are lost on shutdown");
            Arc::new(InMemoryStudentRepository::new())
        }
    };

    let router = app(AppState::new(repository), &config);

    let listener = TcpListener::bind(&config.api.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.api.bind_addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
