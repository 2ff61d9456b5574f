// Error type shared by every persistence port.
//
// Purpose
// - Keep use case handlers independent of the backing store. Adapters translate
//   their native errors (sqlx, lock poisoning, simulated outages) into this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        RepositoryError::Backend(error.to_string())
    }
}
