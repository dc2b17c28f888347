//! Arena server binary.
//!
//! Composition root: reads configuration from the environment, loads content,
//! builds the [`Arena`] over an in-memory store and serves line-delimited JSON
//! over TCP.
//!
//! ```bash
//! ARENA_SEED_USERS="1:ana,2:bo" cargo run -p arena-server
//! printf '{"action":"find_match","player_id":1}\n' | nc 127.0.0.1 7878
//! ```
mod config;
mod logging;
mod server;

use anyhow::{Context, Result};
use arena_content::ContentFactory;
use arena_runtime::{Arena, InMemoryStore};
use config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env()?;
    let _log_guard = logging::init(&config.log)?;

    let content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::embedded(),
    };
    let rules = content.load_config().context("failed to load game rules")?;
    let catalog = content.load_catalog().context("failed to load power catalog")?;
    tracing::info!(
        powers = catalog.powers.len(),
        rarities = catalog.rarities.len(),
        seed_users = config.seed_users.len(),
        "content loaded"
    );

    let arena = Arena::builder(InMemoryStore::with_users(config.seed_users.clone()))
        .config(rules)
        .catalog_data(catalog)
        .build()?;

    let listener = server::bind(config.bind_addr).await?;

    tokio::select! {
        result = server::serve(listener, arena.into_handle(), config.max_line_bytes) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            Ok(())
        }
    }
}
