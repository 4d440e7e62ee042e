mod allocator;
mod catalog;
mod cli;
mod config;
mod error;
mod request;
mod session;
mod ui;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use cli::{Cli, Command};
use config::LaundryConfig;
use request::CalculationRequest;
use session::Session;
use ui::Renderer;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = LaundryConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let format = cli.format.unwrap_or(config.format);
    let renderer = Renderer::new(format, config.currency_symbol.clone());
    let catalog = Catalog::standard();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Calc { quantity, unit } => {
            let unit = unit.unwrap_or(config.default_unit);
            let calc = CalculationRequest::new(quantity, unit).evaluate(catalog)?;
            info!(
                loads = %calc.loads,
                covered = %calc.allocation.covered_loads(),
                total = %calc.allocation.total_cost(),
                machines = calc.allocation.machine_count(),
                "calculated"
            );
            renderer.calculation(&mut out, &calc)?;
        }
        Command::Catalog { unit } => {
            renderer.catalog(&mut out, catalog, unit.unwrap_or(config.default_unit))?;
        }
        Command::Interactive { unit } => {
            let mut session =
                Session::new(catalog, renderer, unit.unwrap_or(config.default_unit));
            session.run(io::stdin().lock(), &mut out)?;
            info!(
                unit = %session.unit(),
                last_total = ?session.last().map(|calc| calc.allocation.total_cost()),
                "session ended"
            );
        }
    }

    out.flush()?;
    Ok(())
}
