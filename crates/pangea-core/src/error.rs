use thiserror::Error;

/// Errors from the core map model.
#[derive(Debug, Error)]
pub enum MapError {
    /// A projection name was requested that is not in the registry.
    /// There is deliberately no fallback to a default projection.
    #[error("unknown projection {0:?}")]
    UnknownProjection(String),
}
