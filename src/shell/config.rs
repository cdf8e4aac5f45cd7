// Runtime configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_COMMIT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Upper bound on how long a toggle waits for store confirmation before
    /// rolling back.
    pub commit_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("ENGAGEMENTS_BIND")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| {
                DEFAULT_BIND
                    .parse()
                    .expect("default bind address is valid")
            });
        let commit_timeout_ms = std::env::var("ENGAGEMENTS_COMMIT_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_COMMIT_TIMEOUT_MS);
        Self {
            bind_addr,
            commit_timeout: Duration::from_millis(commit_timeout_ms),
        }
    }
}
