//! Error taxonomy for game commands.
//!
//! Every variant is recoverable: a command that fails leaves the session
//! exactly as it was before the call.

/// Errors returned by scoring and session commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no dice selected")]
    NothingSelected,

    #[error("illegal state: {0}")]
    IllegalState(String),
}

impl GameError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GameError::InvalidInput(msg.into())
    }

    pub(crate) fn illegal(msg: impl Into<String>) -> Self {
        GameError::IllegalState(msg.into())
    }
}
