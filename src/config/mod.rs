pub mod toml_config;

use crate::adapters::{geoportal, telegram};
use crate::domain::model::FuelType;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "gasbot")]
#[command(about = "Telegram bot that finds the cheapest fuel stations in a Spanish locality")]
pub struct CliConfig {
    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    /// Bot token, normally taken from the environment.
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true, default_value = "")]
    pub token: String,

    #[arg(long, default_value = geoportal::DEFAULT_ENDPOINT)]
    pub source_endpoint: String,

    #[arg(long, default_value = telegram::DEFAULT_API_BASE)]
    pub telegram_api: String,

    #[arg(long, default_value = "diesel-a", help = "Fuel type to rank by")]
    pub fuel: FuelType,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "1", help = "Automatic retries on transport failure (0 or 1)")]
    pub retry_attempts: u32,

    #[arg(long, default_value = "30", help = "Telegram long-poll timeout in seconds")]
    pub poll_timeout: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn source_endpoint(&self) -> &str {
        &self.source_endpoint
    }

    fn telegram_api_base(&self) -> &str {
        &self.telegram_api
    }

    fn bot_token(&self) -> &str {
        &self.token
    }

    fn default_fuel(&self) -> FuelType {
        self.fuel
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn poll_timeout_seconds(&self) -> u64 {
        self.poll_timeout
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source-endpoint", &self.source_endpoint)?;
        validation::validate_url("telegram-api", &self.telegram_api)?;
        validation::validate_non_empty_string("token", &self.token)?;
        validation::validate_range("timeout-seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_range("retry-attempts", self.retry_attempts, 0, 1)?;
        validation::validate_range("poll-timeout", self.poll_timeout, 0, 60)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut full = vec!["gasbot"];
        full.extend_from_slice(args);
        CliConfig::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let config = parse(&["--token", "123:abc"]);
        assert_eq!(config.source_endpoint, geoportal::DEFAULT_ENDPOINT);
        assert_eq!(config.telegram_api, telegram::DEFAULT_API_BASE);
        assert_eq!(config.fuel, FuelType::DieselA);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.retry_attempts, 1);
        assert_eq!(config.poll_timeout, 30);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_fuel_parsing() {
        let config = parse(&["--token", "t", "--fuel", "gasolina-95"]);
        assert_eq!(config.fuel, FuelType::Gasoline95);

        let result = CliConfig::try_parse_from(["gasbot", "--token", "t", "--fuel", "kerosene"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_token_fails_validation() {
        let config = parse(&["--token", ""]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_attempts_capped_at_one() {
        let config = parse(&["--token", "t", "--retry-attempts", "2"]);
        assert!(config.validate().is_err());
    }
}
