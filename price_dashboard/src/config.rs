//! TOML configuration.
//!
//! Every section and field is optional; an absent file means built-in
//! defaults. Example:
//!
//! ```toml
//! [provider]
//! base_url = "https://query1.finance.yahoo.com"
//! timeout_secs = 10
//!
//! [dashboard]
//! default_days = 20
//! default_selection = ["google", "amazon", "facebook", "apple"]
//!
//! [tickers]
//! apple = "AAPL"
//! microsoft = "MSFT"
//! ```
//!
//! Entrypoints:
//! - Parse from a TOML string: [`load_config_str`]
//! - Parse from a file path: [`load_config_path`]
//! - Locate the file from a flag or `PRICE_DASHBOARD_CONFIG`: [`resolve_config_path`]

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use indexmap::IndexMap;
use market_data_ingestor::providers::yahoo_chart::{
    YahooChartConfig,
    provider::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT},
};
use serde::Deserialize;
use shared_utils::env::get_env_var;
use thiserror::Error;

use crate::{
    errors::DashboardError,
    state::{DEFAULT_DAYS, DEFAULT_SELECTION, DashboardState, PriceRange},
    tickers::{TickerMap, TickerMapError},
};

/// Environment variable naming the config file when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "PRICE_DASHBOARD_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid [tickers] section: {0}")]
    Tickers(#[from] TickerMapError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub provider: ProviderSection,
    pub dashboard: DashboardSection,
    /// Replaces the built-in six companies when present.
    pub tickers: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSection {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardSection {
    pub default_days: u32,
    pub default_selection: Vec<String>,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_DAYS,
            default_selection: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DashboardConfig {
    pub fn ticker_map(&self) -> Result<TickerMap, ConfigError> {
        match &self.tickers {
            Some(map) => Ok(TickerMap::new(map.clone())?),
            None => Ok(TickerMap::gafa()),
        }
    }

    pub fn provider_config(&self) -> YahooChartConfig {
        YahooChartConfig {
            base_url: self.provider.base_url.clone(),
            user_agent: self.provider.user_agent.clone(),
            timeout: Duration::from_secs(self.provider.timeout_secs),
        }
    }

    /// Widget state the page opens with.
    pub fn initial_state(&self) -> Result<DashboardState, DashboardError> {
        DashboardState::new(
            self.dashboard.default_days,
            PriceRange::full(),
            self.dashboard.default_selection.clone(),
        )
    }
}

pub fn load_config_str(s: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = toml::from_str(s)?;
    // Surface a bad ticker table at load time rather than at first render.
    config.ticker_map()?;
    Ok(config)
}

pub fn load_config_path(path: impl AsRef<Path>) -> Result<DashboardConfig, ConfigError> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_str(&s)
}

/// `explicit` if given, otherwise the path in [`CONFIG_ENV_VAR`], if set.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| get_env_var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_str("").unwrap();
        assert_eq!(config.ticker_map().unwrap(), TickerMap::gafa());
        assert_eq!(config.initial_state().unwrap(), DashboardState::default());
        assert_eq!(config.provider_config().base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider_config().timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn sections_override_defaults() {
        let config = load_config_str(
            r#"
[provider]
base_url = "http://localhost:9000"
timeout_secs = 3

[dashboard]
default_days = 5
default_selection = ["apple"]

[tickers]
apple = "AAPL"
nvidia = "NVDA"
"#,
        )
        .unwrap();

        let tickers = config.ticker_map().unwrap();
        assert_eq!(tickers.names().collect::<Vec<_>>(), vec!["apple", "nvidia"]);
        let state = config.initial_state().unwrap();
        assert_eq!(state.days(), 5);
        assert_eq!(state.selection(), ["apple"]);
        assert_eq!(config.provider_config().timeout, Duration::from_secs(3));
        assert_eq!(config.provider_config().base_url, "http://localhost:9000");
    }

    #[test]
    fn unknown_fields_and_empty_tickers_are_rejected() {
        assert!(matches!(
            load_config_str("[dashboard]\nshow_volume = true\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            load_config_str("[tickers]\n"),
            Err(ConfigError::Tickers(TickerMapError::Empty))
        ));
    }

    #[test]
    fn out_of_range_default_days_fail_at_state_creation() {
        let config = load_config_str("[dashboard]\ndefault_days = 90\n").unwrap();
        assert!(matches!(
            config.initial_state(),
            Err(DashboardError::InvalidInput(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[tickers]\nnetflix = \"NFLX\"\n").unwrap();

        let config = load_config_path(file.path()).unwrap();
        assert_eq!(config.ticker_map().unwrap().symbol("netflix"), Some("NFLX"));

        let missing = load_config_path("/definitely/not/here.toml");
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn explicit_path_wins() {
        let explicit = PathBuf::from("/etc/price_dashboard.toml");
        assert_eq!(resolve_config_path(Some(explicit.clone())), Some(explicit));
    }
}
