//! Query parse error type

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The term matched none of the known shapes. Queries with a typo'd
    /// field or operator fail loudly instead of silently matching nothing.
    #[error("unrecognized query term '{0}'")]
    UnknownTerm(String),

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}
