use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Config;
use crate::errors::AppError;
use crate::portal::Portal;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Every portal operation is a synchronous read-modify-write, so one lock
    /// serializes them across requests. Never held across an await.
    portal: Arc<Mutex<Portal>>,
    pub config: Config,
}

impl AppState {
    pub fn new(portal: Portal, config: Config) -> Self {
        Self {
            portal: Arc::new(Mutex::new(portal)),
            config,
        }
    }

    pub fn portal(&self) -> Result<MutexGuard<'_, Portal>, AppError> {
        self.portal
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("portal lock poisoned")))
    }
}
