//! Output formatting: table, JSON, plain.
//!
//! Renders data in the format selected by `--output`. Detail views are
//! pre-formatted strings (the commands build their own tables),
//! structured formats use serde, plain emits one value per line.

use std::io::{self, IsTerminal, Write};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Parse a `#rrggbb` hex color into RGB components.
///
/// Returns white on anything that is not a 7-character hex triplet, so
/// a palette typo degrades instead of panicking.
pub fn parse_hex(hex: &str) -> (u8, u8, u8) {
    let parse = |range| u8::from_str_radix(hex.get(range).unwrap_or("ff"), 16).unwrap_or(0xff);
    if hex.len() == 7 && hex.starts_with('#') {
        (parse(1..3), parse(3..5), parse(5..7))
    } else {
        (0xff, 0xff, 0xff)
    }
}

// ── Render dispatcher ────────────────────────────────────────────────

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since detail views compose several tables and summary lines.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}
