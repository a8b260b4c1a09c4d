// ── Aggregation engine ──
//
// Pure projections of a statistics snapshot into the dashboard views.
// No I/O, no state: each function is referentially transparent given
// (snapshot, selection), and an absent or sparse snapshot degrades to
// an empty view instead of failing. Consumers recompute views on every
// render; nothing here is cached.

use serde::Serialize;

use cepre_api::EnrollmentStats;

/// Fixed cyclic chart palette; rows are colored by position.
pub const CHART_PALETTE: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

// ── View row types ──────────────────────────────────────────────────

/// One row of the area-totals view, tagged with its chart color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaTotal {
    pub area: String,
    pub total: u64,
    pub color: &'static str,
}

/// One row of the campus-totals view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SedeTotal {
    pub sede: String,
    pub total: u64,
}

/// One row of the shift-totals view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnoTotal {
    pub turno: String,
    pub total: u64,
}

/// One row of the per-campus area breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SedeAreaRow {
    pub area: String,
    pub total: u64,
}

/// One row of the per-campus area-by-shift breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SedeTurnoRow {
    pub area: String,
    pub turno: String,
    pub total: u64,
}

// ── Projections ─────────────────────────────────────────────────────

/// Totals per academic area, in snapshot order, colored cyclically.
pub fn area_totals(snapshot: Option<&EnrollmentStats>) -> Vec<AreaTotal> {
    let Some(snap) = snapshot else {
        return Vec::new();
    };

    snap.por_area
        .iter()
        .enumerate()
        .map(|(i, (area, &total))| AreaTotal {
            area: area.clone(),
            total,
            color: CHART_PALETTE[i % CHART_PALETTE.len()],
        })
        .collect()
}

/// Totals per campus, in snapshot order.
pub fn sede_totals(snapshot: Option<&EnrollmentStats>) -> Vec<SedeTotal> {
    let Some(snap) = snapshot else {
        return Vec::new();
    };

    snap.por_sede
        .iter()
        .map(|(sede, &total)| SedeTotal {
            sede: sede.clone(),
            total,
        })
        .collect()
}

/// Totals per shift, in snapshot order.
pub fn turno_totals(snapshot: Option<&EnrollmentStats>) -> Vec<TurnoTotal> {
    let Some(snap) = snapshot else {
        return Vec::new();
    };

    snap.por_turno
        .iter()
        .map(|(turno, &total)| TurnoTotal {
            turno: turno.clone(),
            total,
        })
        .collect()
}

/// Campus names available for selection, in snapshot order.
pub fn available_sedes(snapshot: Option<&EnrollmentStats>) -> Vec<String> {
    let Some(snap) = snapshot else {
        return Vec::new();
    };

    snap.por_sede.keys().cloned().collect()
}

/// Per-area totals for one campus, summed across shifts from
/// `detalle_completo` (never trusted from `por_area`).
///
/// Zero-total areas are excluded; rows are sorted descending by total.
/// The sort is stable, so ties keep snapshot order.
pub fn sede_area_breakdown(snapshot: Option<&EnrollmentStats>, sede: &str) -> Vec<SedeAreaRow> {
    let Some(snap) = snapshot else {
        return Vec::new();
    };

    let mut rows: Vec<SedeAreaRow> = snap
        .detalle_completo
        .iter()
        .filter_map(|(area, sedes)| {
            let total: u64 = sedes.get(sede).map_or(0, |turnos| turnos.values().sum());
            (total > 0).then(|| SedeAreaRow {
                area: area.clone(),
                total,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// Per-area, per-shift counts for one campus, from `detalle_completo`.
///
/// Zero rows are excluded; rows are sorted ascending lexicographically
/// by (area, turno).
pub fn sede_turno_breakdown(snapshot: Option<&EnrollmentStats>, sede: &str) -> Vec<SedeTurnoRow> {
    let Some(snap) = snapshot else {
        return Vec::new();
    };

    let mut rows: Vec<SedeTurnoRow> = Vec::new();
    for (area, sedes) in &snap.detalle_completo {
        let Some(turnos) = sedes.get(sede) else {
            continue;
        };
        for (turno, &total) in turnos {
            if total > 0 {
                rows.push(SedeTurnoRow {
                    area: area.clone(),
                    turno: turno.clone(),
                    total,
                });
            }
        }
    }

    rows.sort_by(|a, b| (&a.area, &a.turno).cmp(&(&b.area, &b.turno)));
    rows
}

// ── Tests ───────────────────────────────────────────────────────────
