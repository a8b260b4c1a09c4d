//! Status command handler.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use cepre_core::{CoreError, ServiceStatus};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::resolve(global)?;
    let client = cfg.build_client()?;

    let status = client.service_status().await.map_err(CoreError::from)?;

    let colored = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &status,
        |s| render_status(s, colored),
        |s| s.status.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_status(status: &ServiceStatus, colored: bool) -> String {
    let mut out = String::new();

    let value = if colored && status.status == "online" {
        status.status.green().to_string()
    } else {
        status.status.clone()
    };
    let _ = writeln!(out, "Status:               {value}");
    let _ = writeln!(out, "Authenticated:        {}", yes_no(status.authenticated));
    let _ = writeln!(out, "Cache valid:          {}", yes_no(status.cache_valid));
    let _ = writeln!(
        out,
        "Vacancy cache valid:  {}",
        yes_no(status.vacantes_cache_valid)
    );
    if let Some(ref stamp) = status.cache_timestamp {
        let _ = writeln!(out, "Cache timestamp:      {stamp}");
    }
    if let Some(ref stamp) = status.session_timestamp {
        let _ = writeln!(out, "Session timestamp:    {stamp}");
    }

    out.truncate(out.trim_end().len());
    out
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
