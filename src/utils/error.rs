use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} ({url})")]
    HttpStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data file '{source_name}' has {found} header columns, expected at least {required}")]
    HeaderMismatchError {
        source_name: String,
        found: usize,
        required: usize,
    },

    #[error("Invalid input: \"{input}\". Please enter a year (YYYY) or a year range (YYYY-YYYY) between {min} and {max}.")]
    InvalidInputError { input: String, min: i64, max: i64 },

    #[error("Data not loaded. Please try again.")]
    DataNotLoadedError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    DataSource,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::InvalidInputError { .. } => ErrorCategory::Input,
            AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AnalyzerError::CsvError(_)
            | AnalyzerError::HeaderMismatchError { .. }
            | AnalyzerError::DataNotLoadedError => ErrorCategory::DataSource,
            AnalyzerError::HttpError(_) | AnalyzerError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            AnalyzerError::IoError(_) | AnalyzerError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::DataSource => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Message suitable for the person at the terminal, without the error chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AnalyzerError::InvalidInputError { .. } | AnalyzerError::DataNotLoadedError => {
                self.to_string()
            }
            AnalyzerError::IoError(e) => format!("Could not read data file: {}", e),
            AnalyzerError::HttpError(_) | AnalyzerError::HttpStatusError { .. } => {
                format!("Could not fetch data file: {}", self)
            }
            AnalyzerError::HeaderMismatchError { .. } => format!(
                "{}. Please ensure it matches the expected format.",
                self
            ),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Enter a single year such as 850 or a range such as 700-799",
            ErrorCategory::Configuration => "Check the command line flags and the TOML config file",
            ErrorCategory::DataSource => {
                "Make sure the data file exists and uses the expected column layout"
            }
            ErrorCategory::Network => "Check the data URL and network connectivity, then retry",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
