use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::portal::JobDeletePolicy;

/// Which `KeyValueStore` backend to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub store_backend: StoreBackend,
    pub job_delete_policy: JobDeletePolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            data_dir: PathBuf::from(var("DATA_DIR", "./data")),
            store_backend: var("STORE_BACKEND", "file")
                .parse::<StoreBackend>()
                .map_err(|e: String| anyhow!(e))
                .context("STORE_BACKEND must be 'file' or 'memory'")?,
            job_delete_policy: var("JOB_DELETE_POLICY", "forbid")
                .parse::<JobDeletePolicy>()
                .map_err(|e: String| anyhow!(e))
                .context("JOB_DELETE_POLICY must be 'forbid' or 'cascade'")?,
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
        })
    }
}
