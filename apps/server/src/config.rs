use std::time::Duration;

use datarelay_aggregator::DEFAULT_ATTEMPT_TIMEOUT;

/// Runtime configuration, read once from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP server binds to (`DR_LISTEN_ADDR`).
    pub listen_addr: String,

    /// Per-provider attempt timeout (`DR_ATTEMPT_TIMEOUT_SECS`).
    pub attempt_timeout: Duration,

    /// Access key for data.fixer.io; the provider is skipped when absent
    /// (`FIXER_ACCESS_KEY`).
    pub fixer_access_key: Option<String>,

    /// Token for ipinfo.io; the provider is called without one when absent
    /// (`IPINFO_TOKEN`).
    pub ipinfo_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr =
            std::env::var("DR_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let attempt_timeout = std::env::var("DR_ATTEMPT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ATTEMPT_TIMEOUT);

        Self {
            listen_addr,
            attempt_timeout,
            fixer_access_key: non_empty_var("FIXER_ACCESS_KEY"),
            ipinfo_token: non_empty_var("IPINFO_TOKEN"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
