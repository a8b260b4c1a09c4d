// Admissions service HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, status checking, and
// `{"detail": "..."}` failure-body extraction. All methods return parsed
// payloads; callers never see raw responses.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{EnrollmentStats, ErrorBody, FichaResponse, ServiceStatus};

#[derive(Serialize)]
struct DniBody<'a> {
    dni: &'a str,
}

/// Raw HTTP client for the admissions statistics service.
///
/// Cheap to clone; holds only the `reqwest::Client` handle and the
/// service base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the service root, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the student enrollment statistics snapshot.
    pub async fn student_statistics(&self) -> Result<EnrollmentStats, Error> {
        self.get_json("api/estudiantes/estadisticas").await
    }

    /// Fetch the vacancy statistics snapshot (same shape as enrollment).
    pub async fn vacancy_statistics(&self) -> Result<EnrollmentStats, Error> {
        self.get_json("api/vacantes/estadisticas").await
    }

    /// Request a ficha (enrollment document) locator for a DNI.
    ///
    /// The service answers 404 when no student matches and 400 when the
    /// DNI is malformed; both surface as [`Error::Api`] with the server
    /// detail.
    pub async fn request_ficha(&self, dni: &str) -> Result<FichaResponse, Error> {
        let url = self.endpoint("api/estudiantes/ficha")?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(&DniBody { dni })
            .send()
            .await
            .map_err(Error::Transport)?;

        parse_body(resp).await
    }

    /// Probe the service's self-reported status.
    pub async fn service_status(&self) -> Result<ServiceStatus, Error> {
        self.get_json("api/status").await
    }

    /// Ask the service to drop its upstream cache and session.
    pub async fn clear_cache(&self) -> Result<(), Error> {
        let url = self.endpoint("api/cache")?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await.map_err(Error::Transport)?;
        check_status(resp).await?;
        Ok(())
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let full = format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'));
        Ok(Url::parse(&full)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_body(resp).await
    }
}

/// Check the status, returning `Error::Api` with the extracted detail
/// on non-2xx responses.
async fn check_status(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if status.is_success() {
        return Ok(body);
    }

    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail);

    Err(Error::Api {
        status: status.as_u16(),
        detail,
    })
}

/// Check the status and parse the success body as JSON.
async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = check_status(resp).await?;

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}
