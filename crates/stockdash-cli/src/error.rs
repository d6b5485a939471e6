use stockdash_core::{ConfigError, DashboardError, HttpError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to set up HTTP client: {0}")]
    HttpSetup(#[from] HttpError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", .0.user_message())]
    Refresh(#[from] DashboardError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::HttpSetup(_) => 2,
            Self::Validation(_) => 2,
            Self::Refresh(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
