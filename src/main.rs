use anyhow::{Context, Result};
use respond::config::Config;
use respond::i18n::{DirectorySource, TranslationRegistry};
use respond::server::{self, AppState};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("respond=info".parse()?),
        )
        .init();

    info!("Starting respond service");

    let config = Config::from_env()?;

    // Bundled packs first, then overrides from disk
    let registry = TranslationRegistry::bundled();
    if let Some(dir) = &config.lang_dir {
        let count = registry
            .seed(&DirectorySource::new(dir))
            .with_context(|| format!("Failed to load language packs from {}", dir.display()))?;
        info!("Loaded {} language pack(s) from {}", count, dir.display());
    }

    if config.api_key.is_none() {
        warn!("API_KEY not set, language registration over HTTP is disabled");
    }

    info!(
        "Languages: {}",
        registry
            .languages()
            .iter()
            .map(|code| code.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let state = AppState {
        registry: Arc::new(registry),
        config: Arc::new(config),
    };
    server::serve(state).await
}
