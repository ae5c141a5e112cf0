// Blogpost - a small blog post service
// Three JSON endpoints over a single SQLite table

#![warn(rust_2018_idioms)]

pub mod server;
pub mod storage;

// Re-exports for convenience
pub use storage::{BlogPost, NewPost, Storage, StorageEngine};

/// Blogpost error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Storage error: {0}")]
        Storage(String),

        #[error("Not found: {0}")]
        NotFound(String),

        #[error("Invalid argument: {0}")]
        InvalidArgument(String),

        #[error("Internal error: {0}")]
        Internal(String),
    }

    impl From<rusqlite::Error> for Error {
        fn from(err: rusqlite::Error) -> Self {
            Error::Storage(err.to_string())
        }
    }

    impl From<tokio::task::JoinError> for Error {
        fn from(err: tokio::task::JoinError) -> Self {
            Error::Internal(format!("storage task failed: {}", err))
        }
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::error::Error;

    #[test]
    fn test_rusqlite_errors_map_to_storage() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, Error::Storage(_)));
    }
}
