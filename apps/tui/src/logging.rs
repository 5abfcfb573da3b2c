use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;

fn default_filter(debug: bool) -> &'static str {
    if debug {
        "energy_dashboard=debug,energy_dashboard_tui=debug"
    } else {
        "energy_dashboard=info,energy_dashboard_tui=info"
    }
}

/// Headless runs log to stderr; the interactive dashboard logs to a file so
/// the alternate screen stays clean.
pub fn init(settings: &Settings, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(settings.debug).into());

    let registry = tracing_subscriber::registry().with(filter);

    if headless {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| eyre!("Failed to initialize logging: {e}"))?;
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .try_init()
            .map_err(|e| eyre!("Failed to initialize logging: {e}"))?;
    }

    Ok(())
}
