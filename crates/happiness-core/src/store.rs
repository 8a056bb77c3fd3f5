use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::token::Token;

/// Storage contract for tokens and their visit counters.
///
/// Implementations must make [`TokenStore::increment_and_fetch`] a single
/// atomic step: the increment, the `last_visit_at` update and the returned
/// count all come from one indivisible operation, never a read followed by
/// a separate write.
pub trait TokenStore: Send + Sync {
    /// Insert a new token with `visit_count = 0` and no `last_visit_at`.
    ///
    /// Returns [`StorageError::Duplicate`] if `value` already exists; an
    /// existing row is never overwritten.
    fn insert(&self, value: &str, created_at: DateTime<Utc>) -> Result<(), StorageError>;

    /// Increment the count for `value`, set `last_visit_at` to `now`
    /// (clamped to `created_at`), and return the new count.
    ///
    /// `Ok(None)` means no such token; nothing was changed.
    fn increment_and_fetch(
        &self,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<u64>, StorageError>;

    /// Read a token without counting a visit.
    fn fetch(&self, value: &str) -> Result<Option<Token>, StorageError>;
}
