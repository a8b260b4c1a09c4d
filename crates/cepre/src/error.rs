//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use cepre_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the admissions service: {reason}")]
    #[diagnostic(
        code(cepre::connection_failed),
        help(
            "Check that the service is running and accessible.\n\
             Override the URL with --base-url or CEPRE_BASE_URL."
        )
    )]
    Connection { reason: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Service error (HTTP {status}): {message}")]
    #[diagnostic(code(cepre::api_error))]
    Api { status: u16, message: String },

    #[error("invalid data received")]
    #[diagnostic(
        code(cepre::invalid_data),
        help("The service answered with a body that could not be parsed.")
    )]
    InvalidData,

    #[error("{message}")]
    #[diagnostic(code(cepre::service))]
    Service { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cepre::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(cepre::config))]
    Config(Box<figment::Error>),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::Api { status: 404, .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Network { reason } => CliError::Connection { reason },

            CoreError::Http { status, detail } => CliError::Api {
                status,
                message: detail.unwrap_or_else(|| "no detail".into()),
            },

            CoreError::MalformedResponse => CliError::InvalidData,

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Service { message },
        }
    }
}
