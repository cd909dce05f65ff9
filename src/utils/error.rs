use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlotError::ConfigValidationError { .. }
            | PlotError::InvalidConfigValueError { .. }
            | PlotError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PlotError::CsvError(_) | PlotError::ValidationError { .. } => ErrorCategory::Input,
            PlotError::ProcessingError { .. } | PlotError::SerializationError(_) => {
                ErrorCategory::Processing
            }
            PlotError::IoError(_) | PlotError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlotError::CsvError(_) => {
                "Check that the plot sheet is valid CSV with a header row (plot_number, front, back, left, right, ...)"
            }
            PlotError::ValidationError { .. } => {
                "Fix the reported row in the plot sheet and run again"
            }
            PlotError::ConfigValidationError { .. }
            | PlotError::InvalidConfigValueError { .. }
            | PlotError::MissingConfigError { .. } => {
                "Review the configuration file or command line flags"
            }
            PlotError::IoError(_) => "Check that the input file exists and the output directory is writable",
            PlotError::ZipError(_) => "Disable output bundling or free disk space and retry",
            PlotError::SerializationError(_) | PlotError::ProcessingError { .. } => {
                "Run again with --verbose and inspect the log"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Plot sheet problem: {}", self),
            ErrorCategory::Processing => format!("Could not reconcile plots: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 依嚴重程度決定行程結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
