use pricelens_core::{FetchError, FetchErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] pricelens_core::ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Fetch(error) => match error.kind() {
                FetchErrorKind::AuthExpired => 3,
                FetchErrorKind::RateLimited => 4,
                FetchErrorKind::InvalidRequest => 2,
                FetchErrorKind::Transport | FetchErrorKind::Upstream => 10,
            },
            Self::Command(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
