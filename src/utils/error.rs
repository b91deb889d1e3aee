use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Missing columns: {} - stopping execution", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Row {row} is missing field '{field}'")]
    MalformedRow { row: usize, field: String },

    #[error("Cannot access file '{}': {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    InputData,
    FileSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::MissingColumns { .. }
            | EtlError::MalformedRow { .. }
            | EtlError::CsvError(_) => ErrorCategory::InputData,
            EtlError::FileAccess { .. } => ErrorCategory::FileSystem,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::InputData => ErrorSeverity::High,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    /// 依嚴重程度決定行程退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::MissingColumns { missing } => {
                format!("Fail! Missing columns: {}", missing.join(", "))
            }
            EtlError::MalformedRow { row, field } => format!(
                "Data row {} has no value for column '{}' (row is shorter than the header)",
                row, field
            ),
            EtlError::FileAccess { path, source } => {
                format!("Cannot access '{}': {}", path.display(), source)
            }
            EtlError::CsvError(e) => format!("The input file is not valid CSV: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MissingColumns { .. } => {
                "Add the missing columns to the CSV header row (realName, home-number, mobile-number)"
            }
            EtlError::MalformedRow { .. } => {
                "Make sure every data row has as many fields as the header row"
            }
            EtlError::CsvError(_) => {
                "Check that the file is UTF-8, comma separated and uses double quotes for quoting"
            }
            EtlError::FileAccess { .. } => {
                "Check that the input file exists and the output directory exists and is writable"
            }
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => {
                "Pass --phonebook-name, --input-file and --output-file, or provide them in the --config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
