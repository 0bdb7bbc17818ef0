use dictionary_service::config::Config;
use dictionary_service::entries::memory::MemoryEntryStore;
use dictionary_service::lookup::router::build_router;
use dictionary_service::lookup::service::LookupService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [--bind <addr:port>] [--data <snapshot.json>]", args[0]);
        eprintln!("Example: {} --bind 127.0.0.1:3000 --data words.json", args[0]);
        return Ok(());
    }

    let config = Config::load(&args)?;

    // 1. Entry store:
    let store = match &config.data_file {
        Some(path) => {
            tracing::info!("Using snapshot file {}", path.display());
            MemoryEntryStore::open(path)?
        }
        None => {
            tracing::info!("No data file configured, entries are kept in memory only");
            MemoryEntryStore::new()
        }
    };

    // 2. Lookup service + HTTP router:
    let service = Arc::new(LookupService::new(Arc::new(store)));
    tracing::info!("Dictionary holds {} entries", service.entry_count());
    let app = build_router(service);

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
