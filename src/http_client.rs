use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::Result;

/// Build the HTTP client used for every lookup in a run.
///
/// Requests are strictly sequential, so a tiny idle pool is enough to keep the
/// one connection to the service warm between addresses.
pub fn create_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(1)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)

        // Timeouts
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(5))

        // Compression
        .gzip(true)
        .brotli(true)

        .use_rustls_tls()
        .https_only(false) // local stand-ins for the service speak plain http
        .redirect(reqwest::redirect::Policy::limited(5))

        // The service refuses requests without a descriptive agent
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}
