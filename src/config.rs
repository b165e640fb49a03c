use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use farmily_core::Database;

const DEV_JWT_SECRET: &str = "farmily-development-secret-change-me";

/// Runtime configuration, built once at startup and handed to whatever
/// needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file. `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,
    pub bind: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl Config {
    pub fn open_database(&self) -> farmily_core::Result<Database> {
        match &self.database_path {
            Some(path) => Database::open(path),
            None => Database::open_default(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Path to the SQLite database file
    #[arg(long = "db", env = "FARMILY_DB")]
    pub database_path: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "FARMILY_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Secret used to sign session tokens
    #[arg(long, env = "FARMILY_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Session token lifetime in hours
    #[arg(long, env = "FARMILY_TOKEN_TTL_HOURS", default_value_t = 24)]
    pub token_ttl_hours: u64,
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Self {
        let jwt_secret = args.jwt_secret.unwrap_or_else(|| {
            tracing::warn!("FARMILY_JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });

        Self {
            database_path: args.database_path,
            bind: args.bind,
            jwt_secret,
            token_ttl: Duration::from_secs(args.token_ttl_hours * 60 * 60),
        }
    }
}
