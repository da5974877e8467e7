use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a client for single-shot external calls.
    ///
    /// `timeout` bounds the whole request. There is no retry layer: a failed
    /// call is reported to the caller as-is.
    pub fn create_client(timeout: Duration) -> Client {
        Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}

/// Appends `/{segment}` to `base_url` without doubling slashes.
pub fn join_url(base_url: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}
