use std::sync::Arc;

use bookshelf::api::{self, AppState};
use bookshelf::{Config, InMemoryStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The blocking catalog client owns its own runtime; build it before ours.
    let catalog = config.catalog.connect()?;
    let state = AppState::new(InMemoryStore::new(), catalog);
    let service = Arc::new(api::bookshelf_service(state));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(api::serve(service, &config.bind))?;
    Ok(())
}
