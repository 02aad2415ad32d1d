use std::fmt;
use thiserror::Error;

/// 使用者輸入被拒絕的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputKind {
    NotNumeric,
    OutOfBounds,
    Unrecognized,
}

impl fmt::Display for InvalidInputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInputKind::NotNumeric => write!(f, "not numeric"),
            InvalidInputKind::OutOfBounds => write!(f, "out of bounds"),
            InvalidInputKind::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

#[derive(Error, Debug)]
pub enum OfferError {
    #[error("Failed to open file `{path}`: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Catalog schema error at {location}: {message}")]
    Schema { location: String, message: String },

    #[error("Invalid input: {kind} ({input:?})")]
    InvalidInput { kind: InvalidInputKind, input: String },

    #[error("Input closed")]
    InputClosed,

    #[error("Category `{name}` has no options to choose from")]
    EmptyCategory { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Offer processing error: {message}")]
    Processing { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OfferError {
    pub fn schema(location: impl Into<String>, message: impl Into<String>) -> Self {
        OfferError::Schema {
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            OfferError::FileOpen { .. } | OfferError::Parse(_) | OfferError::Schema { .. } => {
                ErrorCategory::Catalog
            }
            OfferError::InvalidInput { .. }
            | OfferError::InputClosed
            | OfferError::EmptyCategory { .. } => ErrorCategory::Input,
            OfferError::Config { .. } | OfferError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            OfferError::Processing { .. }
            | OfferError::Io(_)
            | OfferError::Serialization(_)
            | OfferError::Csv(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 可重試，只會停留在選單迴圈內
            OfferError::InvalidInput { .. } => ErrorSeverity::Low,
            OfferError::EmptyCategory { .. } | OfferError::Processing { .. } => {
                ErrorSeverity::Medium
            }
            OfferError::Config { .. }
            | OfferError::InvalidConfigValue { .. }
            | OfferError::InputClosed => ErrorSeverity::High,
            _ => ErrorSeverity::Critical,
        }
    }

    /// 對應到程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self {
            OfferError::FileOpen { .. } => 1,
            OfferError::Parse(_) => 2,
            OfferError::Schema { .. } => 3,
            OfferError::InputClosed => 4,
            OfferError::Config { .. } | OfferError::InvalidConfigValue { .. } => 5,
            _ => 6,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, OfferError::InvalidInput { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OfferError::FileOpen { path, .. } => format!("Failed to open file `{}`.", path),
            OfferError::Parse(e) => format!("The catalog file is not valid JSON: {}", e),
            OfferError::Schema { location, message } => {
                format!("The catalog file has an unexpected shape at {}: {}", location, message)
            }
            OfferError::InvalidInput { kind, input } => match kind {
                InvalidInputKind::NotNumeric => {
                    format!("The input '{}' is not a numeric value.", input)
                }
                InvalidInputKind::OutOfBounds => {
                    format!("The input '{}' is out of bounds.", input)
                }
                InvalidInputKind::Unrecognized => {
                    format!("Provided unrecognized input '{}'.", input)
                }
            },
            OfferError::InputClosed => "Input was closed before the session ended.".to_string(),
            OfferError::EmptyCategory { name } => {
                format!("Category '{}' has no options.", name)
            }
            OfferError::Config { message } => format!("Configuration problem: {}", message),
            OfferError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OfferError::FileOpen { .. } => {
                "Make sure the catalog file exists or point --catalog at it"
            }
            OfferError::Parse(_) => "Check the catalog file for JSON syntax errors",
            OfferError::Schema { .. } => {
                "Every category needs a name and a non-empty options list; every option needs a name and a whole-number price"
            }
            OfferError::InvalidInput { .. } => "Enter one of the numbers shown in the prompt",
            OfferError::InputClosed => "Run the assistant from an interactive terminal",
            OfferError::EmptyCategory { .. } => "Add at least one option to the category",
            OfferError::Config { .. } | OfferError::InvalidConfigValue { .. } => {
                "Fix the configuration file or command line flags"
            }
            OfferError::Processing { .. } => "Choose fewer or cheaper options",
            OfferError::Io(_) | OfferError::Csv(_) | OfferError::Serialization(_) => {
                "Check permissions of the output directory and the terminal"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, OfferError>;
