//! Test doubles for driving the service into specific states.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use snip_cache::MokaUrlCache;
use snip_core::{
    cache, repository, CacheError, NewRecord, Repository, ShortCode, StorageError, UrlCache,
    UrlRecord,
};
use snip_generator::{Generator, GeneratorError};
use snip_shortener::{MemorySink, ShortenerConfig, ShortenerService};
use snip_storage::InMemoryRepository;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

/// Short timeouts so hanging doubles do not slow the suite down.
pub fn fast_config() -> ShortenerConfig {
    ShortenerConfig::builder()
        .cache_timeout(Duration::from_millis(20))
        .store_timeout(Duration::from_millis(200))
        .build()
}

pub fn service<R: Repository, C: UrlCache, G: Generator>(
    repository: R,
    cache: C,
    generator: G,
) -> (ShortenerService<R, C, G>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let service =
        ShortenerService::new(repository, cache, generator, fast_config()).with_sink(sink.clone());
    (service, sink)
}

/// Hands out a fixed sequence of codes, repeating the last one forever.
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<ShortCode>>,
    last: Mutex<Option<ShortCode>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            codes: Mutex::new(codes.into_iter().map(code).collect()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock();
        if let Some(next) = self.codes.lock().pop_front() {
            *last = Some(next);
        }
        last.clone()
            .ok_or_else(|| GeneratorError::EntropySource("script is empty".to_string()))
    }
}

/// A generator whose entropy source is gone.
pub struct BrokenGenerator;

impl Generator for BrokenGenerator {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        Err(GeneratorError::EntropySource("getrandom failed".to_string()))
    }
}

/// Wraps the in-memory store, counts calls and can be told to fail.
#[derive(Default)]
pub struct ProbeRepository {
    inner: InMemoryRepository,
    pub puts: AtomicUsize,
    pub gets: AtomicUsize,
    pub increments: AtomicUsize,
    pub fail_put: AtomicBool,
    pub fail_get: AtomicBool,
    pub fail_increment: AtomicBool,
}

impl ProbeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn increments(&self) -> usize {
        self.increments.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    fn unavailable() -> StorageError {
        StorageError::Unavailable("connection refused".to_string())
    }
}

#[async_trait]
impl Repository for ProbeRepository {
    async fn put(&self, record: &NewRecord) -> repository::Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.put(record).await
    }

    async fn get(&self, code: &ShortCode) -> repository::Result<Option<UrlRecord>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.get(code).await
    }

    async fn increment_visit_count(&self, code: &ShortCode) -> repository::Result<()> {
        self.increments.fetch_add(1, Ordering::SeqCst);
        if self.fail_increment.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.increment_visit_count(code).await
    }
}

/// A store that never answers.
pub struct HangingRepository;

#[async_trait]
impl Repository for HangingRepository {
    async fn put(&self, _record: &NewRecord) -> repository::Result<()> {
        std::future::pending().await
    }

    async fn get(&self, _code: &ShortCode) -> repository::Result<Option<UrlRecord>> {
        std::future::pending().await
    }

    async fn increment_visit_count(&self, _code: &ShortCode) -> repository::Result<()> {
        std::future::pending().await
    }
}

/// A moka cache that counts calls and can be emptied on demand.
#[derive(Default)]
pub struct ProbeCache {
    inner: MokaUrlCache,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
}

impl ProbeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub async fn evict(&self, code: &ShortCode) {
        self.inner.del(code).await.expect("moka del never fails");
    }
}

#[async_trait]
impl UrlCache for ProbeCache {
    async fn get_url(&self, code: &ShortCode) -> cache::Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_url(code).await
    }

    async fn set_url(&self, code: &ShortCode, original_url: &str, ttl: Duration) -> cache::Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set_url(code, original_url, ttl).await
    }

    async fn del(&self, code: &ShortCode) -> cache::Result<()> {
        self.inner.del(code).await
    }
}

/// A cache whose backend is down.
pub struct FailingCache;

#[async_trait]
impl UrlCache for FailingCache {
    async fn get_url(&self, _code: &ShortCode) -> cache::Result<Option<String>> {
        Err(CacheError::Unavailable("connection reset".to_string()))
    }

    async fn set_url(&self, _code: &ShortCode, _url: &str, _ttl: Duration) -> cache::Result<()> {
        Err(CacheError::Unavailable("connection reset".to_string()))
    }

    async fn del(&self, _code: &ShortCode) -> cache::Result<()> {
        Err(CacheError::Unavailable("connection reset".to_string()))
    }
}

/// A cache that never answers.
pub struct HangingCache;

#[async_trait]
impl UrlCache for HangingCache {
    async fn get_url(&self, _code: &ShortCode) -> cache::Result<Option<String>> {
        std::future::pending().await
    }

    async fn set_url(&self, _code: &ShortCode, _url: &str, _ttl: Duration) -> cache::Result<()> {
        std::future::pending().await
    }

    async fn del(&self, _code: &ShortCode) -> cache::Result<()> {
        std::future::pending().await
    }
}
