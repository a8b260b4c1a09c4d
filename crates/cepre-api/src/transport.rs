// Shared transport configuration for building reqwest::Client instances.
//
// The admissions service sits behind plain HTTPS with no client auth,
// so the knobs reduce to timeout and user agent. Kept as its own module
// so the CLI and tests build clients the same way.

use std::time::Duration;

/// Transport settings for the admissions service HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("cepre-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()?;
        Ok(client)
    }
}
