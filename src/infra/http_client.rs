//! HTTP client factory with consistent timeout configuration.
//!
//! Outbound clients should be built here rather than constructing
//! `reqwest::Client` directly, so every remote call carries both a connect
//! and a total-request bound.

use std::time::Duration;

use reqwest::Client;

/// Default connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the client used for identity-provider calls. `request_timeout`
/// bounds the whole request/response exchange and comes from configuration.
pub fn build_client(request_timeout: Duration) -> anyhow::Result<Client> {
    let client = Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .build()?;
    Ok(client)
}
