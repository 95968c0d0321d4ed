//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line arguments, in increasing order of precedence.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use pricer_core::types::{BusinessDayConvention, Date, DayCountConvention};
use pricer_models::instruments::equity::{Dividend, DividendSchedule, FdSettings, OptionParams};
use pricer_models::instruments::rates::BasisSwapType;
use pricer_models::instruments::PayoffType;
use pricer_models::schedules::Frequency;
use pricer_pricing::fd::FdScheme;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "PRICER_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl fmt::Display) -> Self {
        ConfigError::InvalidValue {
            field,
            message: message.to_string(),
        }
    }
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Deserialises any `FromStr` type from a TOML string.
fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

/// One floating leg of the basis swap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LegConfig {
    /// Coupon and index tenor ("1M", "3M", "6M", "12M").
    #[serde(deserialize_with = "deserialize_from_str")]
    pub tenor: Frequency,
    /// Spread over the index fixing.
    pub spread: f64,
    /// Accrual day count.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub day_count: DayCountConvention,
    /// Business days between fixing and accrual start.
    pub fixing_days: u32,
    /// Flat forecasting rate of the leg's index.
    pub forecast_rate: f64,
}

impl LegConfig {
    fn with_tenor(tenor: Frequency) -> Self {
        Self {
            tenor,
            spread: 0.0,
            day_count: DayCountConvention::ActualActual360,
            fixing_days: 2,
            forecast_rate: 0.03,
        }
    }
}

impl Default for LegConfig {
    fn default() -> Self {
        Self::with_tenor(Frequency::Quarterly)
    }
}

/// Which leg a stored fixing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegSide {
    Short,
    Long,
}

/// Historic index fixing.
#[derive(Debug, Clone, Deserialize)]
pub struct FixingConfig {
    /// Leg whose index fixed.
    pub leg: LegSide,
    /// Fixing date.
    pub date: Date,
    /// Fixed rate.
    pub rate: f64,
}

/// `basis-swap` command inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BasisSwapConfig {
    /// Valuation date.
    pub evaluation_date: Date,
    /// Payer pays the short-tenor leg.
    pub swap_type: BasisSwapType,
    /// Notional of both legs.
    pub nominal: f64,
    /// First accrual start.
    pub start_date: Date,
    /// Last accrual end.
    pub maturity_date: Date,
    /// Payment adjustment; defaults to the short schedule's convention.
    #[serde(default, deserialize_with = "deserialize_optional_convention")]
    pub payment_convention: Option<BusinessDayConvention>,
    /// Flat discounting rate.
    pub discount_rate: f64,
    /// Whether coupons paid on the valuation date count.
    pub include_settlement_date_flows: bool,
    /// Shorter-tenor leg.
    pub short_tenor: LegConfig,
    /// Longer-tenor leg.
    pub long_tenor: LegConfig,
    /// Historic fixings.
    pub fixings: Vec<FixingConfig>,
}

fn deserialize_optional_convention<'de, D>(
    deserializer: D,
) -> Result<Option<BusinessDayConvention>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_from_str(deserializer).map(Some)
}

impl Default for BasisSwapConfig {
    fn default() -> Self {
        let date = |y, m, d| Date::from(NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default());
        Self {
            evaluation_date: date(2024, 1, 10),
            swap_type: BasisSwapType::Payer,
            nominal: 10_000_000.0,
            start_date: date(2024, 1, 15),
            maturity_date: date(2029, 1, 15),
            payment_convention: None,
            discount_rate: 0.03,
            include_settlement_date_flows: false,
            short_tenor: LegConfig {
                spread: 0.0010,
                ..LegConfig::with_tenor(Frequency::Quarterly)
            },
            long_tenor: LegConfig::with_tenor(Frequency::SemiAnnual),
            fixings: Vec::new(),
        }
    }
}

impl BasisSwapConfig {
    /// Validate the basis-swap inputs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.nominal.is_finite() && self.nominal > 0.0) {
            return Err(ConfigError::invalid("nominal", "must be positive"));
        }
        if self.maturity_date <= self.start_date {
            return Err(ConfigError::invalid(
                "maturity_date",
                format!("{} not after start {}", self.maturity_date, self.start_date),
            ));
        }
        if self.long_tenor.tenor.is_shorter_than(self.short_tenor.tenor) {
            return Err(ConfigError::invalid(
                "short_tenor",
                "tenor longer than the long-tenor leg",
            ));
        }
        for (field, rate) in [
            ("discount_rate", self.discount_rate),
            ("short_tenor.forecast_rate", self.short_tenor.forecast_rate),
            ("long_tenor.forecast_rate", self.long_tenor.forecast_rate),
            ("short_tenor.spread", self.short_tenor.spread),
            ("long_tenor.spread", self.long_tenor.spread),
        ] {
            if !rate.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }
        if let Some(fixing) = self.fixings.iter().find(|f| !f.rate.is_finite()) {
            return Err(ConfigError::invalid(
                "fixings",
                format!("non-finite rate on {}", fixing.date),
            ));
        }
        Ok(())
    }
}

/// `shout-option` command inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShoutOptionConfig {
    /// Payoff and market inputs.
    pub option: OptionParams,
    /// Cash dividends, strictly increasing ex-times.
    pub dividends: Vec<Dividend>,
    /// Grid resolution.
    pub settings: FdSettings,
    /// Time-stepping scheme.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub scheme: FdScheme,
}

impl Default for ShoutOptionConfig {
    fn default() -> Self {
        Self {
            option: OptionParams::new(PayoffType::Call, 100.0, 100.0, 0.0, 0.05, 1.0, 0.2),
            dividends: vec![Dividend::new(0.25, 1.0), Dividend::new(0.75, 1.0)],
            settings: FdSettings::new(200, 201),
            scheme: FdScheme::CrankNicolson,
        }
    }
}

impl ShoutOptionConfig {
    /// Validated dividend schedule.
    pub fn dividend_schedule(&self) -> Result<DividendSchedule, ConfigError> {
        DividendSchedule::new(self.dividends.clone())
            .map_err(|e| ConfigError::invalid("dividends", e))
    }

    /// Validate the option inputs
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.option
            .validate()
            .map_err(|e| ConfigError::invalid("option", e))?;
        self.settings
            .validate()
            .map_err(|e| ConfigError::invalid("settings", e))?;
        let schedule = self.dividend_schedule()?;
        let policy = self.settings.valuation_date_dividend;
        schedule
            .validate_within(self.option.residual_time, policy)
            .map_err(|e| ConfigError::invalid("dividends", e))?;
        schedule
            .validate_against_spot(self.option.underlying, policy)
            .map_err(|e| ConfigError::invalid("dividends", e))
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PricerConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// `basis-swap` inputs.
    pub basis_swap: BasisSwapConfig,
    /// `shout-option` inputs.
    pub shout_option: ShoutOptionConfig,
}

impl PricerConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PricerConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.basis_swap.validate()?;
        self.shout_option.validate()
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(scheme) = &cli.scheme {
            self.shout_option.scheme = FdScheme::from_str(scheme)
                .map_err(|e| ConfigError::invalid("scheme", e))?;
        }
        Ok(())
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Log level override
    pub log_level: Option<String>,
    /// Scheme override for `shout-option`
    pub scheme: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(
    config_file: Option<&Path>,
    env_log_level: Option<String>,
    cli: &CliOverrides,
) -> Result<PricerConfig, ConfigError> {
    let mut config = match config_file {
        Some(path) => PricerConfig::from_file(path)?,
        None => PricerConfig::default(),
    };

    if let Some(level) = env_log_level {
        config.log_level = LogLevel::from_str(&level)?;
    }

    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::equity::ValuationDateDividend;

    #[test]
    fn test_default_config() {
        let config = PricerConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.basis_swap.swap_type, BasisSwapType::Payer);
        assert_eq!(config.basis_swap.short_tenor.tenor, Frequency::Quarterly);
        assert_eq!(config.basis_swap.long_tenor.tenor, Frequency::SemiAnnual);
        assert_eq!(config.shout_option.scheme, FdScheme::CrankNicolson);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let config = PricerConfig::from_toml(
            r#"
            log_level = "debug"

            [basis_swap]
            evaluation_date = "2024-03-01"
            swap_type = "Receiver"
            nominal = 5000000.0
            start_date = "2024-01-15"
            maturity_date = "2027-01-15"
            payment_convention = "modified following"
            include_settlement_date_flows = true

            [basis_swap.short_tenor]
            tenor = "1M"
            spread = 0.0005
            day_count = "ACT/360"

            [basis_swap.long_tenor]
            tenor = "6M"
            forecast_rate = 0.032

            [[basis_swap.fixings]]
            leg = "short"
            date = "2024-01-11"
            rate = 0.0391

            [shout_option]
            scheme = "implicit"
            dividends = [{ time = 0.5, amount = 2.0 }]

            [shout_option.option]
            option_type = "put"
            underlying = 95.0
            strike = 100.0
            dividend_yield = 0.0
            risk_free_rate = 0.04
            residual_time = 1.0
            volatility = 0.25

            [shout_option.settings]
            time_steps = 150
            grid_points = 151
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        let swap = &config.basis_swap;
        assert_eq!(swap.swap_type, BasisSwapType::Receiver);
        assert_eq!(swap.short_tenor.tenor, Frequency::Monthly);
        assert_eq!(swap.short_tenor.fixing_days, 2);
        assert_eq!(swap.long_tenor.forecast_rate, 0.032);
        assert_eq!(
            swap.payment_convention,
            Some(BusinessDayConvention::ModifiedFollowing)
        );
        assert!(swap.include_settlement_date_flows);
        assert_eq!(swap.fixings.len(), 1);
        assert_eq!(swap.fixings[0].leg, LegSide::Short);

        let option = &config.shout_option;
        assert_eq!(option.scheme, FdScheme::Implicit);
        assert_eq!(option.option.option_type, PayoffType::Put);
        assert_eq!(option.settings.time_steps, 150);
        assert_eq!(option.settings.valuation_date_dividend, ValuationDateDividend::Reject);
        assert_eq!(option.dividend_schedule().unwrap().len(), 1);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = PricerConfig::default();
        config.basis_swap.nominal = -1.0;
        assert!(config.validate().is_err());

        let mut config = PricerConfig::default();
        config.basis_swap.maturity_date = config.basis_swap.start_date;
        assert!(config.validate().is_err());

        let mut config = PricerConfig::default();
        config.basis_swap.short_tenor.tenor = Frequency::Annual;
        assert!(config.validate().is_err());

        let mut config = PricerConfig::default();
        config.shout_option.dividends = vec![Dividend::new(0.8, 1.0), Dividend::new(0.2, 1.0)];
        assert!(config.validate().is_err());

        let mut config = PricerConfig::default();
        config.shout_option.dividends = vec![Dividend::new(0.0, 1.0)];
        assert!(config.validate().is_err());
        config.shout_option.settings.valuation_date_dividend = ValuationDateDividend::Exclude;
        assert!(config.validate().is_ok());

        let mut config = PricerConfig::default();
        let spot = config.shout_option.option.underlying;
        config.shout_option.dividends = vec![Dividend::new(0.5, spot)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_reports_file_error() {
        let err = PricerConfig::from_toml("log_level = 3").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));

        let err = PricerConfig::from_toml("[basis_swap]\nswap_type = \"Sideways\"").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_priority_cli_over_env_over_file() {
        let path = std::env::temp_dir().join(format!("pricer-cli-{}.toml", std::process::id()));
        std::fs::write(&path, "log_level = \"warn\"\n[shout_option]\nscheme = \"explicit\"\n")
            .unwrap();

        let config = build_config(Some(&path), None, &CliOverrides::default()).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.shout_option.scheme, FdScheme::Explicit);

        let config =
            build_config(Some(&path), Some("debug".to_string()), &CliOverrides::default())
                .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);

        let cli = CliOverrides {
            log_level: Some("error".to_string()),
            scheme: Some("cn".to_string()),
        };
        let config = build_config(Some(&path), Some("debug".to_string()), &cli).unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.shout_option.scheme, FdScheme::CrankNicolson);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = build_config(
            Some(Path::new("/nonexistent/pricer.toml")),
            None,
            &CliOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_bad_overrides() {
        let cli = CliOverrides {
            log_level: None,
            scheme: Some("adi".to_string()),
        };
        assert!(build_config(None, None, &cli).is_err());
        assert!(build_config(None, Some("loud".to_string()), &CliOverrides::default()).is_err());
    }
}
