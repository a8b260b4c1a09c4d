//! Statistics command handler.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use cepre_core::aggregate::{self, AreaTotal, SedeAreaRow, SedeTotal, SedeTurnoRow, TurnoTotal};
use cepre_core::{CoreError, Dataset, StatsController, StatsPhase};

use crate::cli::{GlobalOpts, StatsArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Report ──────────────────────────────────────────────────────────

/// Everything one `stats` invocation resolved, serialized as-is for
/// the structured output formats.
#[derive(Serialize)]
struct StatsReport {
    total: u64,
    ultimo_update: Option<String>,
    fetched_at: Option<String>,
    areas: Vec<AreaTotal>,
    sedes: Vec<SedeTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    turnos: Option<Vec<TurnoTotal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sede_breakdown: Option<SedeBreakdown>,
}

#[derive(Serialize)]
struct SedeBreakdown {
    sede: String,
    areas: Vec<SedeAreaRow>,
    turnos: Vec<SedeTurnoRow>,
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct AreaRow {
    #[tabled(rename = "Area")]
    area: String,
    #[tabled(rename = "Total")]
    total: u64,
    #[tabled(rename = "Color")]
    color: String,
}

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Total")]
    total: u64,
}

#[derive(Tabled)]
struct TurnoRow {
    #[tabled(rename = "Area")]
    area: String,
    #[tabled(rename = "Turno")]
    turno: String,
    #[tabled(rename = "Total")]
    total: u64,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: StatsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::resolve(global)?;
    let client = cfg.build_client()?;

    if args.fresh {
        client.clear_cache().await.map_err(CoreError::from)?;
        tracing::info!("service cache cleared");
    }

    let dataset = if args.vacantes {
        Dataset::Vacantes
    } else {
        Dataset::Estudiantes
    };
    let controller = StatsController::new(client, dataset);
    controller.refresh().await;

    let state = controller.state();
    if state.phase == StatsPhase::Error {
        return Err(CliError::Service {
            message: state
                .error
                .unwrap_or_else(|| "statistics fetch failed".into()),
        });
    }
    let snapshot = state.snapshot.ok_or_else(|| CliError::Service {
        message: "no statistics received".into(),
    })?;
    let snap = Some(snapshot.as_ref());

    let sede_breakdown = match args.sede {
        Some(sede) => {
            let available = aggregate::available_sedes(snap);
            if !available.contains(&sede) {
                return Err(CliError::Validation {
                    field: "sede".into(),
                    reason: format!("unknown sede '{sede}', available: {}", available.join(", ")),
                });
            }
            Some(SedeBreakdown {
                areas: aggregate::sede_area_breakdown(snap, &sede),
                turnos: aggregate::sede_turno_breakdown(snap, &sede),
                sede,
            })
        }
        None => None,
    };

    let report = StatsReport {
        total: snapshot.total,
        ultimo_update: snapshot.ultimo_update.clone(),
        fetched_at: state.last_updated,
        areas: aggregate::area_totals(snap),
        sedes: aggregate::sede_totals(snap),
        turnos: args.turnos.then(|| aggregate::turno_totals(snap)),
        sede_breakdown,
    };

    let colored = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &report,
        |r| render_report(r, colored),
        |r| r.total.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Table rendering ─────────────────────────────────────────────────

fn render_report(report: &StatsReport, colored: bool) -> String {
    let mut out = String::new();

    let title = if colored {
        format!("Total: {}", report.total.bold())
    } else {
        format!("Total: {}", report.total)
    };
    let _ = writeln!(out, "{title}");
    if let Some(ref stamp) = report.ultimo_update {
        let _ = writeln!(out, "Server update: {stamp}");
    }
    if let Some(ref stamp) = report.fetched_at {
        let _ = writeln!(out, "Fetched at:    {stamp}");
    }

    let _ = writeln!(out, "\nBy area:");
    let _ = writeln!(out, "{}", area_table(&report.areas, colored));

    let _ = writeln!(out, "\nBy sede:");
    let rows: Vec<TotalRow> = report
        .sedes
        .iter()
        .map(|r| TotalRow {
            name: r.sede.clone(),
            total: r.total,
        })
        .collect();
    let _ = writeln!(out, "{}", styled(&rows));

    if let Some(ref turnos) = report.turnos {
        let _ = writeln!(out, "\nBy turno:");
        let rows: Vec<TotalRow> = turnos
            .iter()
            .map(|r| TotalRow {
                name: r.turno.clone(),
                total: r.total,
            })
            .collect();
        let _ = writeln!(out, "{}", styled(&rows));
    }

    if let Some(ref breakdown) = report.sede_breakdown {
        let _ = writeln!(out, "\nAreas at {}:", breakdown.sede);
        let rows: Vec<TotalRow> = breakdown
            .areas
            .iter()
            .map(|r| TotalRow {
                name: r.area.clone(),
                total: r.total,
            })
            .collect();
        let _ = writeln!(out, "{}", styled(&rows));

        let _ = writeln!(out, "\nShifts at {}:", breakdown.sede);
        let rows: Vec<TurnoRow> = breakdown
            .turnos
            .iter()
            .map(|r| TurnoRow {
                area: r.area.clone(),
                turno: r.turno.clone(),
                total: r.total,
            })
            .collect();
        let _ = writeln!(out, "{}", styled(&rows));
    }

    // Drop the trailing newline; print_output adds its own.
    out.truncate(out.trim_end().len());
    out
}

fn area_table(areas: &[AreaTotal], colored: bool) -> String {
    let rows: Vec<AreaRow> = areas
        .iter()
        .map(|r| AreaRow {
            area: r.area.clone(),
            total: r.total,
            color: if colored {
                let (red, green, blue) = output::parse_hex(r.color);
                format!("{} {}", "██".truecolor(red, green, blue), r.color)
            } else {
                r.color.to_owned()
            },
        })
        .collect();
    styled(&rows)
}

fn styled<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}
