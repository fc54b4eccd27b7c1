use thiserror::Error;

/// Errors returned by the scaling engine.
///
/// There are no recoverable errors inside the resampling pipeline itself;
/// everything here is either a caller mistake (bad rectangle) or a hard
/// resource limit being hit.
#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("internal overflow: {0}")]
    InternalOverflow(String),
}

pub type Result<T> = std::result::Result<T, ScaleError>;
