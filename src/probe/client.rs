use reqwest::redirect::Policy;
use std::time::Duration;

use crate::config::Config;
use crate::core::error::Result;

/// Build the HTTP client shared by every probe of a run.
///
/// Redirects are returned to the caller instead of followed, and
/// certificate validation is off so self-signed and misconfigured targets
/// still answer. The idle pool is sized to the concurrency ceiling so
/// released connections are kept for reuse instead of thrashing.
pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    let concurrency = config.concurrency();

    let client = reqwest::Client::builder()
        .timeout(config.timeout_duration())
        .redirect(Policy::none())
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(concurrency)
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .build()?;

    Ok(client)
}
