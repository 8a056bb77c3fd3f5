use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::store::TokenStore;
use crate::token::{Token, VisitResult, redact};

/// Counts visits per token.
#[derive(Clone)]
pub struct VisitCounter {
    store: Arc<dyn TokenStore>,
}

impl VisitCounter {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Count one visit for `token` and return the new count.
    ///
    /// Concurrent calls for the same token each see a distinct count; the
    /// atomicity comes from [`TokenStore::increment_and_fetch`].
    pub fn record_visit(&self, token: &str) -> Result<VisitResult, StorageError> {
        match self.store.increment_and_fetch(token, Utc::now()) {
            Ok(Some(count)) => {
                debug!("Token {}... visit count: {}", redact(token), count);
                Ok(VisitResult::Counted(count))
            }
            Ok(None) => {
                debug!("Visit for unknown token {}...", redact(token));
                Ok(VisitResult::UnknownToken)
            }
            Err(e) => {
                warn!("Failed to count visit for {}...: {}", redact(token), e);
                Err(e)
            }
        }
    }

    /// Current state of `token`, without counting a visit.
    pub fn current(&self, token: &str) -> Result<Option<Token>, StorageError> {
        self.store.fetch(token)
    }
}
