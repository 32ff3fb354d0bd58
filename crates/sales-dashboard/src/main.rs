mod bootstrap;
mod present;

use std::process::ExitCode;

use dashboard_core::settings::Settings;
use dashboard_runtime::cache::LoadCache;
use dashboard_runtime::render::{render, RenderOutcome};

fn main() -> anyhow::Result<ExitCode> {
    let settings = Settings::load_with_last_used();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Sales dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        data_file = %settings.data_file.display(),
        format = %settings.format,
        "configuration resolved"
    );

    let mut cache = LoadCache::new();
    let outcome = render(&mut cache, &settings.data_file);

    if settings.wants_json() {
        println!("{}", present::json_outcome(&outcome)?);
    }

    match outcome {
        RenderOutcome::Ready { view, .. } => {
            if !settings.wants_json() {
                print!("{}", present::text_dashboard(&view));
            }
            Ok(ExitCode::SUCCESS)
        }
        RenderOutcome::Halted { error } => {
            // Nothing but the error is shown for a halted render.
            if !settings.wants_json() {
                eprintln!("{}", present::text_error(&error));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
