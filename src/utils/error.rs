use thiserror::Error;

/// Which of the three slash-separated fields a parse problem belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Day,
    Month,
    Year,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Segment::Day => "day",
            Segment::Month => "month",
            Segment::Year => "year",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("Date '{date}' is missing its {segment} segment")]
    MissingSegment { date: String, segment: Segment },

    #[error("The {segment} segment '{value}' is not a base-10 integer")]
    InvalidNumber { segment: Segment, value: String },

    #[error("The {segment} segment '{value}' does not fit in a 32-bit integer")]
    OutOfRange { segment: Segment, value: String },
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Date parse error: {0}")]
    DateError(#[from] DateParseError),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MatchError::IoError(_) => ErrorCategory::Io,
            MatchError::CsvError(_)
            | MatchError::SerializationError(_)
            | MatchError::DateError(_) => ErrorCategory::Data,
            MatchError::ConfigValidationError { .. }
            | MatchError::MissingConfigError { .. }
            | MatchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MatchError::IoError(_) => "Check that the input file exists and is readable",
            MatchError::CsvError(_) => {
                "Make sure the CSV export has a header row: id,type,title,category,amount,date"
            }
            MatchError::SerializationError(_) => {
                "Make sure the JSON export is an array of transaction objects"
            }
            MatchError::DateError(_) => "Dates must use the dd/MM/yyyy layout, e.g. 15/06/2023",
            MatchError::ConfigValidationError { .. } => {
                "Fix the TOML configuration file and try again"
            }
            MatchError::MissingConfigError { .. } => {
                "Pass the missing value on the command line or in the config file"
            }
            MatchError::InvalidConfigValueError { .. } => "Correct the highlighted value",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MatchError::IoError(e) => format!("Could not read input: {}", e),
            MatchError::MissingConfigError { field } => {
                format!("'{}' is required but was not provided", field)
            }
            MatchError::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
