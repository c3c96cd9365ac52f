//! phasor - terminal explorer for phasor inner products
//!
//! Run with: cargo run --bin phasor
//!
//! Set PHASOR_LOG to a tracing filter (e.g. `phasor_lab=debug`) to write
//! engine logs to ./phasor.log while the UI owns the terminal.

mod app;
mod ui;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use std::{fs::File, sync::Mutex};
use tracing_subscriber::EnvFilter;

use app::App;
use phasor_lab::scene::Demo;

const LOG_ENV: &str = "PHASOR_LOG";
const LOG_FILE: &str = "phasor.log";

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let terminal = ratatui::init();
    let result = App::new(Demo::MeasuringFrequency).run(terminal);
    ratatui::restore();
    result
}

fn init_logging() -> EyreResult<()> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!("logging to {LOG_FILE}");
    Ok(())
}
