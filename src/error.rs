use crate::models::PlayerColor;
use crate::store::StoreError;

/// Everything that can stop a tracker flow. None of these leave a partial write behind.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// A required field is missing or two confirmation fields differ.
    #[error("{0}")]
    Validation(String),

    /// A player or admin password did not match.
    #[error("{0}")]
    AuthFailed(String),

    /// Admin-gated flow attempted before any admin password was set.
    #[error("No admin password is set yet. Save the players first to create one.")]
    AdminNotConfigured,

    #[error("No player with color {0}")]
    PlayerNotFound(PlayerColor),

    /// The player exists but has never been given a password.
    #[error("Player {0} has no password yet. Set one on the setup screen.")]
    MissingCredential(PlayerColor),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Export error: {0}")]
    Export(#[from] csv::Error),
}

impl TrackerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TrackerError::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
