// ── Runtime connection configuration ──
//
// Describes *how* to reach the admissions service. The host (CLI)
// resolves files, env vars, and flags into one of these and hands it
// in -- core never touches disk.

use std::time::Duration;

use url::Url;

use cepre_api::ApiClient;
use cepre_api::transport::TransportConfig;

use crate::error::CoreError;

/// Configuration for one dashboard session against the admissions
/// service.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Service base URL (e.g., `http://127.0.0.1:8000`).
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
}

impl DashboardConfig {
    /// Build the API client this configuration describes.
    pub fn build_client(&self) -> Result<ApiClient, CoreError> {
        let transport = TransportConfig {
            timeout: self.timeout,
            ..TransportConfig::default()
        };
        ApiClient::new(self.base_url.clone(), &transport).map_err(CoreError::from)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000"
                .parse()
                .expect("static default URL"),
            timeout: Duration::from_secs(30),
        }
    }
}
