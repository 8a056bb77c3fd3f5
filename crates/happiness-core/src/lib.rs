//! Token-scoped visit counting.
//!
//! [`TokenIssuer`] mints opaque visitor tokens, [`VisitCounter`] bumps a
//! token's count on every tracked page view. Both talk to storage only
//! through the [`TokenStore`] contract, so the SQLite store and the
//! in-memory [`MemoryStore`] are interchangeable.

pub mod counter;
pub mod dispatch;
pub mod error;
pub mod issuer;
pub mod memory;
pub mod store;
pub mod token;

pub use counter::VisitCounter;
pub use error::StorageError;
pub use issuer::TokenIssuer;
pub use memory::MemoryStore;
pub use store::TokenStore;
pub use token::{Token, VisitResult, redact};
