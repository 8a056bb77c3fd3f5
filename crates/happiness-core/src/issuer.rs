use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::StorageError;
use crate::store::TokenStore;
use crate::token::redact;

/// Mints new visitor tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    store: Arc<dyn TokenStore>,
}

impl TokenIssuer {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Create and persist a fresh token with a zero count.
    ///
    /// Every call mints a new value from a random v4 UUID. On error no
    /// token exists and the caller must not hand one out.
    pub fn issue(&self) -> Result<String, StorageError> {
        let value = Uuid::new_v4().to_string();

        if let Err(e) = self.store.insert(&value, Utc::now()) {
            warn!("Failed to issue token: {}", e);
            return Err(e);
        }

        info!("Issued token {}...", redact(&value));
        Ok(value)
    }
}
