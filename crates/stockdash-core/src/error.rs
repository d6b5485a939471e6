use thiserror::Error;

/// Input validation errors raised while interpreting user selections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("unknown stock '{value}', expected one of Apple, Microsoft, Google, Amazon, Tesla")]
    UnknownStock { value: String },

    #[error("table row limit must be between 1 and {max}, got {value}")]
    InvalidRowLimit { value: usize, max: usize },
}

/// Network, timeout, and non-2xx failures talking to the quote provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request to {function} timed out after {timeout_ms}ms")]
    Timeout { function: String, timeout_ms: u64 },

    #[error("request to {function} failed: {message}")]
    Network { function: String, message: String },

    #[error("{function} returned HTTP status {status}")]
    Status { function: String, status: u16 },
}

/// The provider answered, but not with the data we expected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataShapeError {
    #[error("missing expected key '{key}'")]
    MissingKey { key: String },

    #[error("unparsable {field} value '{value}' on {date}")]
    UnparsableNumber {
        date: String,
        field: &'static str,
        value: String,
    },

    #[error("unrecognized time series shape: {detail}")]
    UnrecognizedShape { detail: String },

    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("malformed JSON from {function}: {message}")]
    MalformedJson { function: String, message: String },

    #[error("provider notice from {function}: {message}")]
    ProviderNotice { function: String, message: String },
}

impl DataShapeError {
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    pub fn unrecognized_shape(detail: impl Into<String>) -> Self {
        Self::UnrecognizedShape {
            detail: detail.into(),
        }
    }
}

/// Startup configuration failures. These are fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {name} is not set or is blank")]
    MissingApiKey { name: &'static str },

    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("failed to read env file: {message}")]
    EnvFile { message: String },
}

/// Failure of a single refresh pass, classified for presentation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    DataShape(#[from] DataShapeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DashboardError {
    /// One-line message suitable for showing to the user in place of the chart.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(error) => format!("Request error: {error}"),
            Self::DataShape(error) => format!("Unexpected error: {error}"),
            Self::Config(error) => format!("Configuration error: {error}"),
            Self::Validation(error) => format!("Invalid selection: {error}"),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "dashboard.transport",
            Self::DataShape(_) => "dashboard.data_shape",
            Self::Config(_) => "dashboard.config",
            Self::Validation(_) => "dashboard.validation",
        }
    }
}
