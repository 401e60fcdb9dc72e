pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod ids;

use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use config::Config;
use db::Store;

pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("serve" | "-s" | "--serve") => run_server(config).await,

        Some("init-db") => cmd_init_db(&config).await,

        Some("check-db") => cmd_check_db(&config).await,

        Some("help" | "-h" | "--help") | None => {
            print_help();
            Ok(())
        }

        Some(other) => {
            println!("Unknown command: {other}");
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("staffhub v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: staffhub <command>");
    println!();
    println!("Commands:");
    println!("  serve      Run the staff timetable API server");
    println!("  init-db    Create the staff table if missing");
    println!("  check-db   Check database connectivity");
    println!("  help       Show this help");
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "Staffhub v{} starting ({} backend)...",
        env!("CARGO_PKG_VERSION"),
        config.database.backend
    );

    let port = config.server.port;
    let state = api::create_app_state(config).await?;
    let app = api::router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("Staff timetable API listening at http://{addr}");
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

/// Create the staff table. The auth tables are owned and migrated by the
/// Agent Hub itself, so this never touches them.
async fn cmd_init_db(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.database.url()?).await?;
    store.ping().await?;
    info!("Staff table created/verified");
    Ok(())
}

async fn cmd_check_db(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.database.url()?).await?;

    match store.ping().await {
        Ok(()) => {
            info!("Database connection OK ({})", config.database.backend);
            Ok(())
        }
        Err(e) => {
            error!("Database connection failed: {}", e);
            Err(e)
        }
    }
}
