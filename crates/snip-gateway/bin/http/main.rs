use anyhow::Context;
use clap::Parser;
use snip_cache::{MokaUrlCache, NullUrlCache, RedisUrlCache};
use snip_core::{Repository, UrlCache};
use snip_gateway::cli::{CacheBackendArg, Cli, StorageBackendArg};
use snip_gateway::telemetry::init_tracing;
use snip_gateway::{App, AppState};
use snip_generator::RandomGenerator;
use snip_shortener::ShortenerService;
use snip_storage::{InMemoryRepository, PostgresRepository};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    init_tracing(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        storage_backend = %config.storage,
        cache_backend = %config.cache,
        "starting snip gateway"
    );

    let repository: Arc<dyn Repository> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(InMemoryRepository::new()),
        StorageBackendArg::Postgres => {
            let dsn = config
                .postgres_dsn
                .as_deref()
                .context("postgres dsn is required when storage backend is postgres")?;
            let repository = PostgresRepository::connect(dsn)
                .await
                .context("failed to connect to postgres")?;
            repository
                .migrate()
                .await
                .context("failed to create postgres schema")?;
            Arc::new(repository)
        }
    };

    let cache: Arc<dyn UrlCache> = match config.cache {
        CacheBackendArg::Moka => Arc::new(MokaUrlCache::new()),
        CacheBackendArg::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("redis url is required when cache backend is redis")?;
            Arc::new(
                RedisUrlCache::connect(url)
                    .await
                    .context("failed to connect to redis")?,
            )
        }
        CacheBackendArg::None => Arc::new(NullUrlCache::new()),
    };

    let service = ShortenerService::new(
        repository,
        cache,
        RandomGenerator::new(),
        config.shortener_config(),
    );

    let state = AppState::new(Arc::new(service), config.public_base_url.clone());
    let app = App::router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
