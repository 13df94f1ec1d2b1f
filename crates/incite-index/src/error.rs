//! Index build/write error type

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
