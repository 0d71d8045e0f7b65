use c2f_ids::IdError;

/// Errors raised around the transformer: configuration and identifier policy.
///
/// Transformation itself is infallible; these only occur while building a transformer.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("identifier policy: {0}")]
    Ids(#[from] IdError),
}

pub type TransformResult<T> = std::result::Result<T, TransformError>;
