// Application state module
// Immutable state shared by every connection task

use std::sync::atomic::{AtomicBool, Ordering};

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,

    // Cached flag for lock-free access on the per-request path
    cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);
        Self {
            config,
            cached_access_log,
        }
    }

    /// Whether access logging is enabled
    pub fn access_log(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }
}
