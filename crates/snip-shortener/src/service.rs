use crate::config::ShortenerConfig;
use crate::error::{Result, ShortenerError};
use crate::shortener::Shortener;
use crate::sink::{BestEffortFailure, FailureSink, Operation, TracingSink};
use async_trait::async_trait;
use snip_core::{cache, repository, CacheError, NewRecord, Repository, ShortCode, StorageError};
use snip_core::{UrlCache, UrlRecord};
use snip_generator::Generator;
use std::future::Future;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};
use url::Url;

/// Cache-aside implementation of [`Shortener`].
///
/// The repository is the source of truth. The cache only ever holds copies
/// of records that were durably written, so a cache failure can slow a
/// request down but never change its answer.
pub struct ShortenerService<R, C, G> {
    repository: Arc<R>,
    cache: Arc<C>,
    generator: Arc<G>,
    sink: Arc<dyn FailureSink>,
    config: ShortenerConfig,
}

impl<R, C, G> Clone for ShortenerService<R, C, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
            generator: Arc::clone(&self.generator),
            sink: Arc::clone(&self.sink),
            config: self.config.clone(),
        }
    }
}

impl<R: Repository, C: UrlCache, G: Generator> ShortenerService<R, C, G> {
    /// Creates a service that reports swallowed failures through [`TracingSink`].
    pub fn new(repository: R, cache: C, generator: G, config: ShortenerConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: Arc::new(cache),
            generator: Arc::new(generator),
            sink: Arc::new(TracingSink),
            config,
        }
    }

    /// Replaces the failure sink.
    pub fn with_sink(mut self, sink: impl FailureSink) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Runs a store call under `store_timeout`.
    async fn store_call<T>(
        &self,
        call: impl Future<Output = repository::Result<T>>,
    ) -> repository::Result<T> {
        let limit = self.config.store_timeout;
        match timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(format!("no answer within {limit:?}"))),
        }
    }

    /// Runs a cache call under `cache_timeout`.
    async fn cache_call<T>(
        &self,
        call: impl Future<Output = cache::Result<T>>,
    ) -> cache::Result<T> {
        let limit = self.config.cache_timeout;
        match timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(format!("no answer within {limit:?}"))),
        }
    }

    fn report(&self, operation: Operation, code: &ShortCode, reason: impl ToString) {
        self.sink.record(BestEffortFailure {
            operation,
            code: code.clone(),
            reason: reason.to_string(),
        });
    }

    async fn cached_url(&self, code: &ShortCode) -> Option<String> {
        match self.cache_call(self.cache.get_url(code)).await {
            Ok(Some(url)) => {
                debug!(code = %code, "cache hit");
                Some(url)
            }
            Ok(None) => {
                trace!(code = %code, "cache miss");
                None
            }
            Err(e) => {
                self.report(Operation::CacheRead, code, e);
                None
            }
        }
    }

    async fn populate_cache(&self, code: &ShortCode, original_url: &str) {
        let ttl = self.config.cache_ttl;
        if let Err(e) = self
            .cache_call(self.cache.set_url(code, original_url, ttl))
            .await
        {
            self.report(Operation::CacheWrite, code, e);
        }
    }

    async fn count_visit(&self, code: &ShortCode) {
        if let Err(e) = self
            .store_call(self.repository.increment_visit_count(code))
            .await
        {
            self.report(Operation::VisitCount, code, e);
        }
    }
}

#[async_trait]
impl<R: Repository, C: UrlCache, G: Generator> Shortener for ShortenerService<R, C, G> {
    async fn create(&self, original_url: &str) -> Result<ShortCode> {
        let original_url = validate_url(original_url)?;

        // A zero budget would never try a single code.
        let attempts = self.config.max_attempts.max(1);

        for attempt in 1..=attempts {
            let code = self.generator.generate()?;
            let record = NewRecord::now(code, original_url);

            match self.store_call(self.repository.put(&record)).await {
                Ok(()) => {
                    self.populate_cache(&record.code, &record.original_url)
                        .await;
                    info!(code = %record.code, attempt, "short url created");
                    return Ok(record.code);
                }
                Err(e) if e.is_duplicate() => {
                    warn!(code = %record.code, attempt, "short code collision, retrying");
                }
                Err(e) => return Err(ShortenerError::StoreWrite(e)),
            }
        }

        Err(ShortenerError::CodeSpaceExhausted { attempts })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>> {
        if let Some(url) = self.cached_url(code).await {
            return Ok(Some(url));
        }

        let record = self
            .store_call(self.repository.get(code))
            .await
            .map_err(ShortenerError::StoreRead)?;

        let Some(record) = record else {
            debug!(code = %code, "short code not found");
            return Ok(None);
        };

        // Both steps are best-effort and independent of each other.
        tokio::join!(
            self.populate_cache(code, &record.original_url),
            self.count_visit(code),
        );

        Ok(Some(record.original_url))
    }

    async fn stats(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        self.store_call(self.repository.get(code))
            .await
            .map_err(ShortenerError::StoreRead)
    }
}

/// Checks that `url` is an absolute http(s) URL with a host, returning it
/// with surrounding whitespace removed.
fn validate_url(url: &str) -> Result<&str> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ShortenerError::InvalidUrl(
            "URL cannot be empty".to_string(),
        ));
    }

    // The parser silently drops tabs and newlines, but the raw string is
    // what gets stored and later sent back in a `Location` header.
    if url.chars().any(char::is_control) {
        return Err(ShortenerError::InvalidUrl(
            "URL must not contain control characters".to_string(),
        ));
    }

    let parsed = Url::parse(url)
        .map_err(|e| ShortenerError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {other}"
            )))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must have a host: {url}"
        )));
    }

    Ok(url)
}
