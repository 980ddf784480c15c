use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid date '{value}' for {field}: {reason}")]
    InvalidDateError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Premium subscription required for {feature}")]
    SubscriptionRequired { feature: String },

    #[error("Birth profile is missing")]
    ProfileMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Access,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InsightError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InsightError::ConfigError { .. }
            | InsightError::ConfigValidationError { .. }
            | InsightError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            InsightError::InvalidDateError { .. } | InsightError::ProfileMissing => {
                ErrorCategory::Input
            }
            InsightError::SubscriptionRequired { .. } => ErrorCategory::Access,
            InsightError::IoError(_)
            | InsightError::SerializationError(_)
            | InsightError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Access => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            InsightError::SubscriptionRequired { feature } => {
                format!("升級為付費訂閱以查看{}", feature)
            }
            InsightError::ProfileMissing => "請先填寫生日信息".to_string(),
            InsightError::InvalidDateError { field, value, .. } => {
                format!("{} 的日期格式不正確: {}", field, value)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        if let InsightError::ProfileMissing = self {
            return "Pass --birth-date YYYY-MM-DD";
        }
        match self.category() {
            ErrorCategory::Configuration => "Check the TOML config file and command-line overrides",
            ErrorCategory::Input => "Dates must use the YYYY-MM-DD format",
            ErrorCategory::Access => "Re-run with --plan premium",
            ErrorCategory::System => "Check that the output path exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightError>;
