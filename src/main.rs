use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::EnvFilter;

use tourism_booking::adapters::clock::SystemClock;
use tourism_booking::adapters::memory::{
    MemoryBookingStore, MemoryEstablishmentStore, MemoryUserDirectory,
};
use tourism_booking::config::load_config;
use tourism_booking::domain::actor::Actor;
use tourism_booking::engine::coordinator::Stores;
use tourism_booking::engine::{AvailabilityIndex, Catalog, ReservationCoordinator};
use tourism_booking::mcp::server::BookingMcpServer;

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [
        PathBuf::from("config.yaml"),
        binary_dir().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Runs the completion sweep every `every` for the life of the process.
fn spawn_completion_sweep(coordinator: Arc<ReservationCoordinator>, every: Duration) {
    tokio::spawn(async move {
        let system = Actor::system();
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            if let Err(e) = coordinator.complete_due(&system).await {
                tracing::error!(error = %e, "Completion sweep failed");
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting tourism-booking server");

    let config_path = find_config_path();
    let config = load_config(&config_path)?;

    tracing::info!(
        users = config.seed.users.len(),
        establishments = config.seed.establishments.len(),
        "Seeding in-memory stores"
    );
    let stores = Stores {
        establishments: Arc::new(MemoryEstablishmentStore::with_establishments(
            config.seed.establishments,
        )),
        bookings: Arc::new(MemoryBookingStore::new()),
        users: Arc::new(MemoryUserDirectory::with_users(config.seed.users)),
    };
    let availability = Arc::new(AvailabilityIndex::new());
    let coordinator = Arc::new(ReservationCoordinator::new(
        stores.clone(),
        Arc::clone(&availability),
        config.pricing,
        config.booking,
        Arc::new(SystemClock),
    ));
    let catalog = Arc::new(Catalog::new(stores, availability));

    if config.jobs.completion_sweep_secs > 0 {
        spawn_completion_sweep(
            Arc::clone(&coordinator),
            Duration::from_secs(config.jobs.completion_sweep_secs),
        );
    } else {
        tracing::info!("Completion sweep disabled");
    }

    let server = BookingMcpServer::new(coordinator, catalog);

    // Start MCP server over stdio
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
