use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::state::{DAYS_MAX, DAYS_MIN};

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily closing prices of large US tech companies")]
pub struct Cli {
    /// Path to a TOML config file (falls back to $PRICE_DASHBOARD_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "price_dashboard=debug" (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the dashboard once and exit
    Render {
        /// Number of most recent days to show
        #[arg(long, value_parser = clap::value_parser!(u32).range(DAYS_MIN as i64..=DAYS_MAX as i64))]
        days: Option<u32>,

        /// Lower bound of the price axis (USD)
        #[arg(long)]
        min: Option<f64>,

        /// Upper bound of the price axis (USD)
        #[arg(long)]
        max: Option<f64>,

        /// Comma-separated companies to plot (e.g. "apple,google")
        #[arg(long, value_delimiter = ',')]
        select: Option<Vec<String>>,

        /// Write the chart here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit a standalone HTML page instead of the Vega-Lite JSON
        #[arg(long)]
        html: bool,
    },

    /// Read widget commands from stdin and re-render after each change
    Interactive {
        /// Rewrite the chart to this file after every render
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a standalone HTML page instead of the Vega-Lite JSON
        #[arg(long)]
        html: bool,
    },
}
