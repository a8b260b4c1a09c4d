// Wire types for the admissions service endpoints.
//
// Map-valued fields use IndexMap: the server emits categories in a
// deliberate order (chart/table order) and consumers depend on it
// surviving deserialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Nested per-shift counts: area → sede → turno → count.
pub type DetalleCompleto = IndexMap<String, IndexMap<String, IndexMap<String, u64>>>;

/// One snapshot of aggregate enrollment (or vacancy) statistics, as
/// served by `GET /api/estudiantes/estadisticas` and
/// `GET /api/vacantes/estadisticas`.
///
/// Replaced wholesale on every successful fetch; never mutated in place.
/// `por_area` and `por_sede` are expected to agree with sums over
/// `detalle_completo`, but consumers recompute per-campus figures from
/// `detalle_completo` rather than assuming consistency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentStats {
    /// Overall enrolled count.
    #[serde(default)]
    pub total: u64,
    /// Counts by academic area, in server order.
    #[serde(default)]
    pub por_area: IndexMap<String, u64>,
    /// Counts by campus, in server order.
    #[serde(default)]
    pub por_sede: IndexMap<String, u64>,
    /// Counts by shift, in server order.
    #[serde(default)]
    pub por_turno: IndexMap<String, u64>,
    /// Counts by "{sede} - {turno}" composite key.
    #[serde(default)]
    pub por_sede_turno: IndexMap<String, u64>,
    /// Authoritative source for per-campus breakdowns.
    #[serde(default)]
    pub detalle_completo: DetalleCompleto,
    /// Server-reported freshness marker, rendered as-is.
    #[serde(default)]
    pub ultimo_update: Option<String>,
}

/// Response of `POST /api/estudiantes/ficha`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FichaResponse {
    /// Retrievable document locator. Absence is treated as a failure
    /// by the caller even when the HTTP exchange succeeded.
    #[serde(default)]
    pub download_url: Option<String>,
    /// The matched enrollment record.
    #[serde(default)]
    pub estudiante: Option<FichaRecord>,
    /// Encrypted locator token; already embedded in `download_url`.
    #[serde(default)]
    pub token: Option<String>,
}

/// Enrollment record wrapper: the personal data nests one level deeper
/// under a second `estudiante` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FichaRecord {
    #[serde(default)]
    pub estudiante: Option<FichaEstudiante>,
}

/// Personal name fields of the matched student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FichaEstudiante {
    #[serde(default)]
    pub nombres: Option<String>,
    #[serde(default)]
    pub paterno: Option<String>,
    #[serde(default)]
    pub materno: Option<String>,
}

/// `GET /api/status` payload: the service's self-reported health.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub cache_valid: bool,
    #[serde(default)]
    pub vacantes_cache_valid: bool,
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub cache_timestamp: Option<String>,
    #[serde(default)]
    pub session_timestamp: Option<String>,
}

/// Failure body convention across all endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
