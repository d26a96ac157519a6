use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarrantyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No serial number could be determined: {reason}")]
    NoSerialError { reason: String },

    #[error("Reference data error: {message}")]
    ReferenceDataError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    FileSystem,
    Configuration,
    Input,
    ReferenceData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WarrantyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WarrantyError::ApiError(_) => ErrorCategory::Network,
            WarrantyError::IoError(_) => ErrorCategory::FileSystem,
            WarrantyError::SerializationError(_) | WarrantyError::ReferenceDataError { .. } => {
                ErrorCategory::ReferenceData
            }
            WarrantyError::ConfigError { .. }
            | WarrantyError::ConfigValidationError { .. }
            | WarrantyError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            WarrantyError::NoSerialError { .. } | WarrantyError::ValidationError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::FileSystem | ErrorCategory::ReferenceData => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error when it ends the run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WarrantyError::ApiError(e) if e.is_timeout() => {
                "The remote server did not answer in time; retry later or raise --timeout"
            }
            WarrantyError::ApiError(_) => {
                "Check network connectivity and that the lookup endpoint is reachable"
            }
            WarrantyError::IoError(_) => "Check that the input/output paths exist and are writable",
            WarrantyError::SerializationError(_) | WarrantyError::ReferenceDataError { .. } => {
                "Check the reference document location and its format (MODEL: VERSION per line or a JSON object)"
            }
            WarrantyError::ConfigError { .. }
            | WarrantyError::ConfigValidationError { .. }
            | WarrantyError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and run again"
            }
            WarrantyError::NoSerialError { .. } => {
                "Pass serial numbers as arguments or use --input with a file of serials"
            }
            WarrantyError::ValidationError { .. } => "Remove empty serial numbers from the input",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WarrantyError::ApiError(e) => match e.url() {
                Some(url) => format!("Request to {} failed", url),
                None => "A network request failed".to_string(),
            },
            WarrantyError::NoSerialError { reason } => {
                format!("Unable to determine any serial number ({})", reason)
            }
            WarrantyError::ReferenceDataError { message } => {
                format!("Unable to load ASD reference data: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WarrantyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_serial_exits_with_one() {
        let err = WarrantyError::NoSerialError {
            reason: "no input".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_reference_data_is_critical() {
        let err = WarrantyError::ReferenceDataError {
            message: "empty".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("ASD reference data"));
    }

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = WarrantyError::InvalidConfigValueError {
            field: "http.timeout_seconds".to_string(),
            value: "0".to_string(),
            reason: "too small".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("http.timeout_seconds"));
    }
}
