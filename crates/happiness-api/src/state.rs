use std::path::PathBuf;
use std::sync::Arc;

use happiness_core::{TokenIssuer, TokenStore, VisitCounter};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub issuer: TokenIssuer,
    pub counter: VisitCounter,
    pub pages_dir: PathBuf,
}

impl AppStateInner {
    pub fn new(store: Arc<dyn TokenStore>, pages_dir: PathBuf) -> AppState {
        Arc::new(Self {
            issuer: TokenIssuer::new(store.clone()),
            counter: VisitCounter::new(store),
            pages_dir,
        })
    }
}
