// cepre-api: Async Rust client for the CEPRE admissions statistics service.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use types::{
    EnrollmentStats, FichaEstudiante, FichaRecord, FichaResponse, ServiceStatus,
};
