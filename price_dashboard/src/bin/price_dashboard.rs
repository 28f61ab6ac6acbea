use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use market_data_ingestor::providers::yahoo_chart::YahooChartProvider;
use price_dashboard::{
    cli::{Cli, Commands},
    config::{DashboardConfig, load_config_path, resolve_config_path},
    session::{ChartSink, run_session},
    view::Dashboard,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    // stdout carries the page and chart; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config = match resolve_config_path(cli.config.clone()) {
        Some(path) => load_config_path(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let tickers = config.ticker_map()?;
    let provider = YahooChartProvider::with_config(config.provider_config())?;
    let dashboard = Dashboard::new(provider, tickers);
    let mut state = config.initial_state()?;

    match cli.command {
        Commands::Render {
            days,
            min,
            max,
            select,
            output,
            html,
        } => {
            if let Some(days) = days {
                state.set_days(days)?;
            }
            if min.is_some() || max.is_some() {
                let current = state.price_range();
                state.set_price_range(min.unwrap_or(current.min()), max.unwrap_or(current.max()))?;
            }
            if let Some(select) = select {
                state.set_selection(select);
            }

            let view = dashboard.render(&state).await;
            let mut stdout = io::stdout().lock();
            match output {
                Some(path) => {
                    write!(stdout, "{view}")?;
                    if (ChartSink { path: path.clone(), html }).write(&view)? {
                        writeln!(stdout, "chart written to {}", path.display())?;
                    }
                }
                None => {
                    // Keep stdout parseable: page text goes to stderr.
                    eprint!("{view}");
                    if let Some(chart) = view.chart() {
                        let rendered = if html {
                            price_dashboard::chart::to_html(chart, &view.title)?
                        } else {
                            serde_json::to_string_pretty(chart)?
                        };
                        writeln!(stdout, "{rendered}")?;
                    }
                }
            }
        }

        Commands::Interactive { output, html } => {
            let sink = output.map(|path| ChartSink { path, html });
            let stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "type `help` for commands")?;
            run_session(&dashboard, state, stdin, &mut stdout, sink.as_ref()).await?;
        }
    }

    Ok(())
}
