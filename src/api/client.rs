use crate::config::HttpSettings;
use anyhow::{Context, Result};
use std::time::Duration;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("isg-tools/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client used by every component in a run
///
/// The request timeout bounds the whole exchange, including streaming an
/// upload body, so a hung server surfaces as a transport error.
pub fn build_http_client(settings: &HttpSettings) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}
