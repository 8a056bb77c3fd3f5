use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::store::TokenStore;
use crate::token::Token;

/// In-memory token store. Every operation runs under one mutex, which makes
/// increment-and-fetch atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    unavailable: AtomicBool,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    tokens: HashMap<String, Token>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StorageError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.tokens.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store offline".into()));
        }
        self.inner
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("lock poisoned: {}", e)))
    }
}

impl TokenStore for MemoryStore {
    fn insert(&self, value: &str, created_at: DateTime<Utc>) -> Result<(), StorageError> {
        let mut inner = self.lock()?;
        if inner.tokens.contains_key(value) {
            return Err(StorageError::Duplicate);
        }

        inner.next_id += 1;
        let token = Token {
            id: inner.next_id,
            value: value.to_string(),
            visit_count: 0,
            created_at,
            last_visit_at: None,
        };
        inner.tokens.insert(value.to_string(), token);
        Ok(())
    }

    fn increment_and_fetch(
        &self,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<u64>, StorageError> {
        let mut inner = self.lock()?;
        let Some(token) = inner.tokens.get_mut(value) else {
            return Ok(None);
        };

        token.visit_count += 1;
        token.last_visit_at = Some(now.max(token.created_at));
        Ok(Some(token.visit_count))
    }

    fn fetch(&self, value: &str) -> Result<Option<Token>, StorageError> {
        Ok(self.lock()?.tokens.get(value).cloned())
    }
}
