use clap::Parser;
use colored::*;
use package_stars::cli::{Cli, StoreBackend};
use package_stars::error::PackageStarsError;
use package_stars::pool::{create_pool, PoolConfig, SurrealStarStore};
use package_stars::server::{build_app, serve};
use package_stars::surreal_client::SurrealConnectionConfig;
use package_stars::{MemoryStarStore, SessionTable, StarConfig, StarStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let mut cli = Cli::parse();

    // Override db_url if --local flag is set
    if cli.local {
        cli.db_url = "ws://localhost:8000".to_string();
        println!("{}", "Running in local mode (DB URL: ws://localhost:8000)".yellow());
    }

    println!("{}", "Package Stars Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .map_err(|e| PackageStarsError::ConfigError(format!("Invalid bind address: {}", e)))?;

    let sessions = SessionTable::new(cli.session_cookie.clone());
    for spec in &cli.sessions {
        sessions.insert_spec(spec).await?;
    }
    if !cli.sessions.is_empty() {
        println!("🔑 Seeded {} session(s) on cookie '{}'", cli.sessions.len(), cli.session_cookie);
    }

    let config = StarConfig {
        login_path: cli.login_path.clone(),
        browse_path: cli.browse_path.clone(),
    };

    match cli.store {
        StoreBackend::Memory => {
            println!("{}", "Using in-memory star store (stars are lost on restart)".yellow());
            run(sessions, MemoryStarStore::new(), config, addr).await
        }
        StoreBackend::Surreal => {
            let connection_config = SurrealConnectionConfig {
                url: cli.db_url.clone(),
                username: cli.db_user.clone(),
                password: cli.db_pass.clone(),
                namespace: cli.db_namespace.clone(),
                database: cli.db_database.clone(),
            };

            let pool_config = PoolConfig {
                max_size: cli.db_pool_max_size,
                connection_timeout: Duration::from_secs(cli.db_connection_timeout),
                ..Default::default()
            };

            let pool = Arc::new(create_pool(connection_config, pool_config)?);
            let store = SurrealStarStore::new(pool);

            // Fail fast if the database is unreachable
            store.ping().await?;
            println!("✅ Connected to SurrealDB at {} ({} pooled connections)", cli.db_url, cli.db_pool_max_size);

            run(sessions, store, config, addr).await
        }
    }
}

async fn run<T: StarStore>(
    sessions: SessionTable,
    store: T,
    config: StarConfig,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let app = build_app(sessions, store, config);

    println!("📡 Serving /star on http://{}", addr);
    println!("\nPress Ctrl+C to stop the server\n");

    serve(app, addr).await?;

    println!("✅ Server stopped");
    Ok(())
}
