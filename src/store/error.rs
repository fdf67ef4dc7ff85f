use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key not found: {key}")]
    NotFound { key: String },

    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("{context}: {message}")]
    Io {
        context: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn io(context: &'static str, message: impl Into<String>) -> Self {
        Self::Io {
            context,
            message: message.into(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
