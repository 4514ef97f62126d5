use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use snip_core::repository::Result;
use snip_core::{NewRecord, Repository, ShortCode, StorageError, UrlRecord};
use tracing::trace;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Uniqueness is enforced through the entry API, so two concurrent inserts
/// of the same code cannot both succeed. Visit increments happen under the
/// shard's write lock.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn put(&self, record: &NewRecord) -> Result<()> {
        match self.storage.entry(record.code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::DuplicateCode(record.code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone().into_record());
                trace!(code = %record.code, "Inserted record");
                Ok(())
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.storage.get(code.as_str()).map(|entry| entry.clone()))
    }

    async fn increment_visit_count(&self, code: &ShortCode) -> Result<()> {
        if let Some(mut entry) = self.storage.get_mut(code.as_str()) {
            entry.visit_count += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn record(c: &str, url: &str) -> NewRecord {
        NewRecord::now(code(c), url)
    }

    #[tokio::test]
    async fn put_and_get() {
        let repo = InMemoryRepository::new();
        let new = record("abc123", "https://example.com");

        repo.put(&new).await.unwrap();

        let stored = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.code, code("abc123"));
        assert_eq!(stored.original_url, "https://example.com");
        assert_eq!(stored.created_at, new.created_at);
        assert_eq!(stored.visit_count, 0);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        assert!(repo.get(&code("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_conflict_keeps_original_record() {
        let repo = InMemoryRepository::new();

        repo.put(&record("abc123", "https://example.com"))
            .await
            .unwrap();

        let err = repo
            .put(&record("abc123", "https://other.com"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());

        let stored = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://example.com");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn increment_visit_count() {
        let repo = InMemoryRepository::new();
        repo.put(&record("abc123", "https://example.com"))
            .await
            .unwrap();

        repo.increment_visit_count(&code("abc123")).await.unwrap();
        repo.increment_visit_count(&code("abc123")).await.unwrap();

        let stored = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.visit_count, 2);
    }

    #[tokio::test]
    async fn increment_missing_code_is_a_no_op() {
        let repo = InMemoryRepository::new();

        repo.increment_visit_count(&code("nope")).await.unwrap();
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.put(&record("abc123", "https://example.com"))
            .await
            .unwrap();

        let mut handles = vec![];
        for _ in 0..100 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.increment_visit_count(&code("abc123")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.visit_count, 100);
    }

    #[tokio::test]
    async fn concurrent_puts_of_same_code_have_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());

        let mut handles = vec![];
        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.put(&record("samecode", &format!("https://example{i}.com")))
                    .await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => wins += 1,
                Err(err) => assert!(err.is_duplicate()),
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(repo.len(), 1);
    }
}
