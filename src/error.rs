//! Error types.

use std::io;

/// Failures the session surfaces to its caller. Gameplay itself never fails;
/// these only come from the save store.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("save store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode game snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not determine a save directory")]
    NoSaveDirectory,
}

/// Failures talking to the narrative service. Always recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("narrative service not configured")]
    Unavailable,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(#[from] io::Error),
}

impl From<ureq::Error> for ServiceError {
    fn from(err: ureq::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}
