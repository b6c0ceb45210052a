use aminochain_search::config::Config;
use aminochain_search::routes::build_router;
use aminochain_search::storage::memory::MemoryStore;
use aminochain_search::storage::remote::HttpDocumentStore;
use aminochain_search::storage::seed::{demo_dataset, load_seed_file};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::from_env()?;

    // 1. Document store:
    let app = match &config.store_url {
        Some(url) => {
            tracing::info!("Reading collections from peer {}", url);
            build_router(Arc::new(HttpDocumentStore::new(url)))
        }
        None => {
            let seed = match &config.data_path {
                Some(path) => load_seed_file(path)?,
                None => {
                    tracing::info!("No seed file given, loading demo dataset");
                    demo_dataset()?
                }
            };
            let store = MemoryStore::from_seed(seed).await;
            tracing::info!(
                "In-memory store ready: {} biobanks, {} specimens",
                store.biobank_count(),
                store.specimen_count().await
            );
            build_router(Arc::new(store))
        }
    };

    // 2. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
