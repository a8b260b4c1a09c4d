//! Ficha command handler.

use serde::Serialize;

use cepre_core::ficha::VALIDATION_MESSAGE;
use cepre_core::{FichaController, FichaPhase};

use crate::cli::{FichaArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Outcome of one ficha request, serialized as-is for the structured
/// output formats.
#[derive(Serialize)]
struct FichaReport {
    message: String,
    download_url: Option<String>,
}

pub async fn handle(args: FichaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::resolve(global)?;
    let client = cfg.build_client()?;

    let controller = FichaController::new(client);
    let mut downloads = controller.subscribe_downloads();

    controller.set_dni(&args.dni);
    controller.submit().await;

    let state = controller.state();
    match state.phase {
        FichaPhase::Succeeded => {
            let report = FichaReport {
                message: state.message.unwrap_or_default(),
                download_url: downloads.try_recv().ok(),
            };
            let out = output::render_single(
                &global.output,
                &report,
                render_report,
                |r| r.download_url.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
        _ => {
            let message = state
                .message
                .unwrap_or_else(|| "ficha request did not complete".into());
            if message == VALIDATION_MESSAGE {
                Err(CliError::Validation {
                    field: "dni".into(),
                    reason: message,
                })
            } else {
                Err(CliError::Service { message })
            }
        }
    }
}

fn render_report(report: &FichaReport) -> String {
    match report.download_url {
        Some(ref url) => format!("{}\nDownload: {url}", report.message),
        None => report.message.clone(),
    }
}
