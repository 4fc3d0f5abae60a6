use std::time::Duration;

use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_RELAYS};

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub relays: Vec<String>,
    pub fetch_timeout: Duration,
}

impl CoreConfig {
    pub fn new(relays: Vec<String>) -> Self {
        Self {
            relays,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RELAYS.iter().map(|s| s.to_string()).collect())
    }
}
