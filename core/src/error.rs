use thiserror::Error;

/// Errors on the ambient surface (serialization, tooling).
///
/// The transition function itself is total: malformed or guard-failing
/// actions are no-ops, never errors.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
