use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farmily::api;
use farmily::config::{Config, ConfigArgs};

#[derive(Parser)]
#[command(name = "farmily")]
#[command(about = "Family tree records: people, relationships, events and a graph view")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create or update the database schema and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "farmily=debug,farmily_core=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from(cli.config);

    let db = config.open_database()?;
    db.migrate()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("Starting Farmily server on {}", config.bind);

            let app = api::create_router(api::AppState::new(db, &config));

            let listener = tokio::net::TcpListener::bind(config.bind).await?;
            tracing::info!("Farmily server listening on http://{}", listener.local_addr()?);

            axum::serve(listener, app).await?;
        }
        Commands::Migrate => {
            println!("Database schema is up to date");
        }
    }

    Ok(())
}
