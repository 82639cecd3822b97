use crate::adapters::{geoportal, telegram};
use crate::domain::model::FuelType;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub bot: BotSection,
    pub source: Option<SourceSection>,
    pub telegram: Option<TelegramSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSection {
    /// Telegram bot token; use `${TELEGRAM_TOKEN}` to pull it from the
    /// environment.
    pub token: String,
    /// Fuel type to rank by, kebab-case ("diesel-a", "gasolina-95", ...).
    pub fuel: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSection {
    pub api_base: Option<String>,
    pub poll_timeout_seconds: Option<u64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BotError::InvalidConfigValue {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values;
    /// unset variables are left as-is so validation can flag them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl ConfigProvider for TomlConfig {
    fn source_endpoint(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.endpoint.as_deref())
            .unwrap_or(geoportal::DEFAULT_ENDPOINT)
    }

    fn telegram_api_base(&self) -> &str {
        self.telegram
            .as_ref()
            .and_then(|t| t.api_base.as_deref())
            .unwrap_or(telegram::DEFAULT_API_BASE)
    }

    fn bot_token(&self) -> &str {
        &self.bot.token
    }

    fn default_fuel(&self) -> FuelType {
        self.bot
            .fuel
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    fn timeout_seconds(&self) -> u64 {
        self.source
            .as_ref()
            .and_then(|s| s.timeout_seconds)
            .unwrap_or(10)
    }

    fn retry_attempts(&self) -> u32 {
        self.source
            .as_ref()
            .and_then(|s| s.retry_attempts)
            .unwrap_or(1)
    }

    fn poll_timeout_seconds(&self) -> u64 {
        self.telegram
            .as_ref()
            .and_then(|t| t.poll_timeout_seconds)
            .unwrap_or(30)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("bot.token", &self.bot.token)?;
        if self.bot.token.starts_with("${") {
            return Err(BotError::InvalidConfigValue {
                field: "bot.token".to_string(),
                value: self.bot.token.clone(),
                reason: "environment variable is not set".to_string(),
            });
        }
        if let Some(fuel) = self.bot.fuel.as_deref() {
            fuel.parse::<FuelType>()
                .map_err(|reason| BotError::InvalidConfigValue {
                    field: "bot.fuel".to_string(),
                    value: fuel.to_string(),
                    reason,
                })?;
        }
        validation::validate_url("source.endpoint", self.source_endpoint())?;
        validation::validate_url("telegram.api_base", self.telegram_api_base())?;
        validation::validate_range("source.timeout_seconds", self.timeout_seconds(), 1, 300)?;
        validation::validate_range("source.retry_attempts", self.retry_attempts(), 0, 1)?;
        validation::validate_range("telegram.poll_timeout_seconds", self.poll_timeout_seconds(), 0, 60)?;
        Ok(())
    }
}
