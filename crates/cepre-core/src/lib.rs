// cepre-core: Aggregation engine and dashboard controllers between
// cepre-api and consumers (CLI or any other presentation host).

pub mod aggregate;
pub mod config;
pub mod error;
pub mod ficha;
pub mod stats;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::DashboardConfig;
pub use error::CoreError;
pub use ficha::{FichaController, FichaPhase, FichaState};
pub use stats::{Dataset, StatsController, StatsPhase, StatsState};

// Re-export the wire types consumers need at the crate root: the wire
// shape is the domain shape, so there is no conversion layer. ApiClient
// is exposed so hosts can build one config and hand clients to both
// controllers.
pub use cepre_api::{ApiClient, EnrollmentStats, ServiceStatus};
