//! Error types for the credential store

use error_common::PlantGuardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Credential storage unavailable: {0}")]
    Unavailable(String),

    #[error("Incomplete credential set: {0}")]
    Incomplete(&'static str),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<StoreError> for PlantGuardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(detail) => PlantGuardError::StorageUnavailable(detail),
            StoreError::Incomplete(field) => {
                PlantGuardError::Validation(format!("credential field `{field}` is missing"))
            }
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
