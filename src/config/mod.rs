//! Environment-driven configuration for the screener process.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveTime, Weekday};
use thiserror::Error;

use crate::core::scheduler::Cadence;
use crate::screener::policy::PolicyVariant;

pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

/// B3 tickers screened when WATCHLIST is not set.
pub const DEFAULT_WATCHLIST: &[&str] = &[
    "ALLD3.SA", "AURE3.SA", "BBAS3.SA", "BBDC4.SA", "CMIG4.SA", "CXSE3.SA", "PETR4.SA", "SAPR4.SA",
    "TAEE3.SA", "TIMS3.SA",
];

pub const DEFAULT_OUTPUT_PATH: &str = "data/top_movers.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub watchlist: Vec<String>,
    pub sma_window: usize,
    pub return_lookback: usize,
    pub top_n: usize,
    pub cadence: Cadence,
    pub policy: PolicyVariant,
    pub quote_range: String,
    pub quote_interval: String,
    pub output_path: PathBuf,
    pub fetch_timeout: Duration,
    pub fetch_retries: usize,
}

impl Config {
    /// Read configuration from the environment. Defaults follow the cadence:
    /// a fixed interval screens intraday 5-minute bars with a 1-period
    /// return, a weekly schedule screens daily bars with a 5-period return
    /// and classifies instead of ranking.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cadence = match env::var("SCREEN_WEEKLY_AT") {
            Ok(raw) => parse_weekly(&raw)?,
            Err(_) => {
                let secs: u64 = parse_env("SCREEN_INTERVAL_SECONDS", 300)?;
                Cadence::Every(Duration::from_secs(secs))
            }
        };
        let weekly = matches!(cadence, Cadence::Weekly { .. });

        let watchlist: Vec<String> = match env::var("WATCHLIST") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
        };

        let policy = match env::var("POLICY_VARIANT") {
            Ok(raw) => raw.parse().map_err(ConfigError::Invalid)?,
            Err(_) if weekly => PolicyVariant::ClassifyAll,
            Err(_) => PolicyVariant::FilterThenRank,
        };

        let config = Self {
            watchlist,
            sma_window: parse_env("SMA_WINDOW", 7)?,
            return_lookback: parse_env("RETURN_LOOKBACK", if weekly { 5 } else { 1 })?,
            top_n: parse_env("TOP_N", 5)?,
            cadence,
            policy,
            quote_range: env::var("QUOTE_RANGE")
                .unwrap_or_else(|_| if weekly { "1mo" } else { "1d" }.to_string()),
            quote_interval: env::var("QUOTE_INTERVAL")
                .unwrap_or_else(|_| if weekly { "1d" } else { "5m" }.to_string()),
            output_path: env::var("OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            fetch_timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT_SECONDS", 10u64)?),
            fetch_retries: parse_env("FETCH_RETRIES", 2)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues: Vec<String> = Vec::new();

        if self.watchlist.is_empty() {
            issues.push("watchlist must contain at least one symbol".into());
        }
        if self.sma_window == 0 {
            issues.push("SMA_WINDOW must be > 0".into());
        }
        if self.return_lookback == 0 {
            issues.push("RETURN_LOOKBACK must be > 0".into());
        }
        if self.top_n == 0 {
            issues.push("TOP_N must be > 0".into());
        }
        if let Cadence::Every(period) = self.cadence {
            if period.is_zero() {
                issues.push("SCREEN_INTERVAL_SECONDS must be > 0".into());
            }
        }
        if self.fetch_timeout.is_zero() {
            issues.push("FETCH_TIMEOUT_SECONDS must be > 0".into());
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues.join("; ")))
        }
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{} must be a valid number", name))),
        Err(_) => Ok(default),
    }
}

/// Parse "Mon 10:00" / "monday 10:00:30" into a weekly cadence.
fn parse_weekly(raw: &str) -> Result<Cadence, ConfigError> {
    let mut parts = raw.split_whitespace();
    let (Some(day), Some(time), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ConfigError::Invalid(format!(
            "SCREEN_WEEKLY_AT must look like 'Mon 10:00', got '{}'",
            raw
        )));
    };

    let weekday = day.parse::<Weekday>().map_err(|_| {
        ConfigError::Invalid(format!("SCREEN_WEEKLY_AT has unknown weekday '{}'", day))
    })?;
    let at = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| {
            ConfigError::Invalid(format!("SCREEN_WEEKLY_AT has invalid time '{}'", time))
        })?;

    Ok(Cadence::Weekly { weekday, at })
}
