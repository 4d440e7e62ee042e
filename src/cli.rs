//! Command-line interface built on clap.
//!
//! Defines [`Cli`] with the [`Command`] subcommands (calc, catalog,
//! interactive) and global flags (--config, --format, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::request::Unit;
use crate::ui::OutputFormat;

/// Laundry cost calculator: which washers to run, and what it costs.
#[derive(Debug, Parser)]
#[command(name = "laundry", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML config file (defaults to ./laundry.toml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enables debug logging on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recommends machines for a quantity of laundry.
    Calc {
        /// Amount of laundry, in loads or pounds.
        #[arg(allow_negative_numbers = true)]
        quantity: String,

        /// Unit the quantity is given in.
        #[arg(long, short, value_enum)]
        unit: Option<Unit>,
    },

    /// Lists the available machines.
    Catalog {
        /// Show capacities in this unit.
        #[arg(long, short, value_enum)]
        unit: Option<Unit>,
    },

    /// Starts an interactive session reading quantities from stdin.
    Interactive {
        /// Unit to start in.
        #[arg(long, short, value_enum)]
        unit: Option<Unit>,
    },
}
