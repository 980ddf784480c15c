use crate::core::digest::DigestSettings;
use crate::core::selector::DEFAULT_CYCLE_COUNT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{InsightError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_CYCLE_COUNT: usize = 14;
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub forecast: ForecastSection,
    pub output: OutputSection,
    pub digest: DigestSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    pub environment: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "Card Science Insight".to_string(),
            environment: "development".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSection {
    pub cycle_count: usize,
    /// Offset used to decide what "today" is.
    pub utc_offset_hours: i32,
}

impl Default for ForecastSection {
    fn default() -> Self {
        Self {
            cycle_count: DEFAULT_CYCLE_COUNT,
            utc_offset_hours: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestSection {
    pub sender: String,
    pub from_name: String,
}

impl Default for DigestSection {
    fn default() -> Self {
        Self {
            sender: "no-reply@cardsci.app".to_string(),
            from_name: "Card Science Insight".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InsightError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InsightError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAIL_SENDER})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InsightError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("app.name", &self.app.name)?;
        validation::validate_range("forecast.cycle_count", self.forecast.cycle_count, 1, MAX_CYCLE_COUNT)?;
        validation::validate_range("forecast.utc_offset_hours", self.forecast.utc_offset_hours, -12, 14)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_email("digest.sender", &self.digest.sender)?;
        validation::validate_non_empty_string("digest.from_name", &self.digest.from_name)?;
        validation::validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        Ok(())
    }

    pub fn json_logging(&self) -> bool {
        self.logging.format == "json"
    }

    pub fn digest_settings(&self) -> DigestSettings {
        DigestSettings {
            app_name: self.app.name.clone(),
            from_name: self.digest.from_name.clone(),
            sender: self.digest.sender.clone(),
            cycle_count: self.forecast.cycle_count,
        }
    }
}

impl ConfigProvider for AppConfig {
    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn cycle_count(&self) -> usize {
        self.forecast.cycle_count
    }

    fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.forecast.utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
