use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub pages_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HAPPINESS_HOST").unwrap_or_else(|| "0.0.0.0".into());
        // PORT is what most container platforms inject.
        let port = lookup("HAPPINESS_PORT")
            .or_else(|| lookup("PORT"))
            .unwrap_or_else(|| "3000".into());
        let port: u16 = port
            .parse()
            .with_context(|| format!("invalid port {:?}", port))?;
        let db_path = lookup("HAPPINESS_DB_PATH")
            .unwrap_or_else(|| "happiness.db".into())
            .into();
        let pages_dir = lookup("HAPPINESS_PAGES_DIR")
            .unwrap_or_else(|| "pages".into())
            .into();

        Ok(Self {
            host,
            port,
            db_path,
            pages_dir,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
