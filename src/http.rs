// src/http.rs
// Shared HTTP client for both GitHub API surfaces

use std::time::Duration;

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub rejects requests without a User-Agent
pub const USER_AGENT: &str = concat!("roadmap-mcp/", env!("CARGO_PKG_VERSION"));

/// Create the shared HTTP client.
///
/// Created once at startup and handed to both resource clients so they
/// share one connection pool. Timeouts surface as transient failures.
pub fn create_shared_client(request_timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(request_timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(10)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
