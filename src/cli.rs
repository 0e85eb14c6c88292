use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Keep stars in process memory
    Memory,
    /// Persist stars in SurrealDB
    Surreal,
}

#[derive(Parser, Debug)]
#[command(name = "package-stars-server")]
#[command(about = "Package Stars Server - Lets logged-in users star and unstar packages")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Where star toggles are persisted
    #[arg(long, env = "STAR_STORE", value_enum, default_value_t = StoreBackend::Memory)]
    pub store: StoreBackend,

    /// SurrealDB connection URL
    #[arg(long, env = "DB_URL", default_value = "ws://localhost:8000")]
    pub db_url: String,

    /// SurrealDB username
    #[arg(long, env = "DB_USER", default_value = "root")]
    pub db_user: String,

    /// SurrealDB password
    #[arg(long, env = "DB_PASS", default_value = "root")]
    pub db_pass: String,

    /// SurrealDB namespace
    #[arg(long, env = "DB_NAMESPACE", default_value = "registry")]
    pub db_namespace: String,

    /// SurrealDB database
    #[arg(long, env = "DB_DATABASE", default_value = "stars")]
    pub db_database: String,

    /// Maximum pooled SurrealDB connections
    #[arg(long, env = "DB_POOL_MAX_SIZE", default_value_t = 10)]
    pub db_pool_max_size: usize,

    /// Seconds to wait when opening a SurrealDB connection
    #[arg(long, env = "DB_CONNECTION_TIMEOUT", default_value_t = 30)]
    pub db_connection_timeout: u64,

    /// Use a local SurrealDB at ws://localhost:8000
    #[arg(long)]
    pub local: bool,

    /// Where anonymous visitors are redirected
    #[arg(long, env = "LOGIN_PATH", default_value = "/login")]
    pub login_path: String,

    /// Prefix of the per-user starred packages page
    #[arg(long, env = "BROWSE_PATH", default_value = "/browse/userstar")]
    pub browse_path: String,

    /// Cookie carrying the session token
    #[arg(long, env = "SESSION_COOKIE", default_value = "sid")]
    pub session_cookie: String,

    /// Pre-seeded session as TOKEN:USERNAME (repeatable)
    #[arg(long = "session", value_name = "TOKEN:USERNAME")]
    pub sessions: Vec<String>,
}
