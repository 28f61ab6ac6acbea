//! Line-oriented interactive front end.
//!
//! Each command adjusts one widget; the page is re-rendered after every state
//! change, mirroring a page that reruns on each interaction.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    str::FromStr,
};

use market_data_ingestor::providers::DataProvider;
use thiserror::Error;
use tracing::debug;

use crate::{
    chart::to_html,
    state::DashboardState,
    view::{Dashboard, View},
};

pub const HELP: &str = "\
commands:
  days N            show the last N days (1-50)
  range MIN MAX     clip the price axis to MIN..MAX USD (0-3500)
  select a,b,...    companies to plot; `select` alone clears the selection
  companies         list the companies that can be selected
  show              render the current state again
  clear-cache       forget fetched prices
  help              this text
  quit              leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Days(u32),
    Range(f64, f64),
    Select(Vec<String>),
    Companies,
    Show,
    ClearCache,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for SessionCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word {
            "days" => rest
                .parse()
                .map(SessionCommand::Days)
                .map_err(|_| ParseCommandError::Usage("days N")),
            "range" => {
                let bounds: Vec<f64> = rest
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<Result<_, _>>()
                    .map_err(|_| ParseCommandError::Usage("range MIN MAX"))?;
                match bounds[..] {
                    [min, max] => Ok(SessionCommand::Range(min, max)),
                    _ => Err(ParseCommandError::Usage("range MIN MAX")),
                }
            }
            "select" => Ok(SessionCommand::Select(
                rest.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect(),
            )),
            "companies" => Ok(SessionCommand::Companies),
            "show" => Ok(SessionCommand::Show),
            "clear-cache" => Ok(SessionCommand::ClearCache),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// Where rendered charts are written, if anywhere.
#[derive(Debug, Clone)]
pub struct ChartSink {
    pub path: PathBuf,
    pub html: bool,
}

impl ChartSink {
    /// Writes the view's chart, if it has one. Error views leave the file alone.
    pub fn write(&self, view: &View) -> io::Result<bool> {
        let Some(chart) = view.chart() else {
            return Ok(false);
        };
        let contents = if self.html {
            to_html(chart, &view.title)
        } else {
            serde_json::to_string_pretty(chart)
        }
        .map_err(io::Error::other)?;
        std::fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), "chart written");
        Ok(true)
    }
}

async fn show<P, W>(
    dashboard: &Dashboard<P>,
    state: &DashboardState,
    out: &mut W,
    sink: Option<&ChartSink>,
) -> io::Result<()>
where
    P: DataProvider,
    W: Write,
{
    let view = dashboard.render(state).await;
    write!(out, "{view}")?;
    if let Some(sink) = sink {
        if sink.write(&view)? {
            writeln!(out, "chart written to {}", sink.path.display())?;
        }
    }
    out.flush()
}

/// Renders `state`, then applies commands from `input` until it ends or the
/// user quits. Returns the final widget state.
pub async fn run_session<P, R, W>(
    dashboard: &Dashboard<P>,
    mut state: DashboardState,
    input: R,
    out: &mut W,
    sink: Option<&ChartSink>,
) -> io::Result<DashboardState>
where
    P: DataProvider,
    R: BufRead,
    W: Write,
{
    show(dashboard, &state, out, sink).await?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        let changed = match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => {
                writeln!(out, "{HELP}")?;
                Ok(false)
            }
            SessionCommand::Companies => {
                let names: Vec<&str> = dashboard.tickers().names().collect();
                writeln!(out, "{}", names.join(", "))?;
                Ok(false)
            }
            SessionCommand::Show => Ok(true),
            SessionCommand::ClearCache => {
                dashboard.cache().clear();
                Ok(true)
            }
            SessionCommand::Days(days) => state.set_days(days).map(|_| true),
            SessionCommand::Range(min, max) => state.set_price_range(min, max).map(|_| true),
            SessionCommand::Select(names) => {
                state.set_selection(names);
                Ok(true)
            }
        };

        match changed {
            Ok(true) => show(dashboard, &state, out, sink).await?,
            Ok(false) => {}
            Err(err) => writeln!(out, "error: {err}")?,
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!("days 5".parse::<SessionCommand>(), Ok(SessionCommand::Days(5)));
        assert_eq!(
            "  range 100 250.5 ".parse::<SessionCommand>(),
            Ok(SessionCommand::Range(100.0, 250.5))
        );
        assert_eq!(
            "select apple, google".parse::<SessionCommand>(),
            Ok(SessionCommand::Select(vec!["apple".into(), "google".into()]))
        );
        assert_eq!("select".parse::<SessionCommand>(), Ok(SessionCommand::Select(vec![])));
        assert_eq!("companies".parse::<SessionCommand>(), Ok(SessionCommand::Companies));
        assert_eq!("show".parse::<SessionCommand>(), Ok(SessionCommand::Show));
        assert_eq!("clear-cache".parse::<SessionCommand>(), Ok(SessionCommand::ClearCache));
        assert_eq!("help".parse::<SessionCommand>(), Ok(SessionCommand::Help));
        assert_eq!("q".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            "days many".parse::<SessionCommand>(),
            Err(ParseCommandError::Usage("days N"))
        );
        assert_eq!(
            "range 1".parse::<SessionCommand>(),
            Err(ParseCommandError::Usage("range MIN MAX"))
        );
        assert_eq!(
            "zoom 2".parse::<SessionCommand>(),
            Err(ParseCommandError::Unknown("zoom".into()))
        );
    }
}
