//! HTTP client wrapper for the Wikipedia read API.

use std::time::Duration;

use reqwest::Client;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this harvester.
///
/// Wikimedia rejects anonymous clients, so every request carries one.
const USER_AGENT: &str = concat!("spadchyna-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::Client` configured with timeout and user agent.
pub fn create_client() -> Result<Client> {
    create_client_with_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
}

/// Create a configured HTTP client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
