// ── Core error types ──
//
// User-facing errors from cepre-core. Every controller failure is
// recovered at the controller boundary and lands in a state field as a
// message -- nothing here escapes as a crash. The `From<cepre_api::Error>`
// impl translates transport-layer errors into the four kinds the
// dashboard distinguishes.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("Network failure: {reason}")]
    Network { reason: String },

    /// Non-2xx response, with the server-supplied detail when present.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Http { status: u16, detail: Option<String> },

    /// Body not parseable as the expected shape.
    #[error("invalid data received")]
    MalformedResponse,

    /// Client-side input rejected before any request was issued.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Configuration error (bad base URL and the like).
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The message shown in dashboard state fields.
    ///
    /// Prefers the server-supplied detail; otherwise a generic message
    /// embedding the status code.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Http {
                status,
                detail: None,
            } => format!("request failed with status {status}"),
            Self::MalformedResponse => "invalid data received".into(),
            Self::Network { reason } => format!("network error: {reason}"),
            Self::Validation { message } | Self::Config { message } => message.clone(),
        }
    }
}

// ── Conversion from transport-layer errors ──────────────────────────

impl From<cepre_api::Error> for CoreError {
    fn from(err: cepre_api::Error) -> Self {
        match err {
            cepre_api::Error::Api { status, detail } => CoreError::Http { status, detail },
            cepre_api::Error::Deserialization { .. } => CoreError::MalformedResponse,
            cepre_api::Error::Transport(e) => {
                if let Some(status) = e.status() {
                    CoreError::Http {
                        status: status.as_u16(),
                        detail: None,
                    }
                } else {
                    CoreError::Network {
                        reason: e.to_string(),
                    }
                }
            }
            cepre_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
        }
    }
}
