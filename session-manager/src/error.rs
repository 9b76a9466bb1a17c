use crate::routes::Route;
use auth_identity::IdentityError;
use credential_store::StoreError;
use error_common::PlantGuardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Another attempt is already in progress")]
    AttemptInProgress,

    #[error("Unrecognized role `{0}`")]
    UnrecognizedRole(String),

    #[error("Route {0} is not available to this session")]
    Forbidden(Route),
}

impl From<SessionError> for PlantGuardError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Identity(identity) => identity.into(),
            SessionError::Storage(store) => store.into(),
            SessionError::AttemptInProgress => PlantGuardError::AttemptInProgress,
            SessionError::UnrecognizedRole(role) => PlantGuardError::UnrecognizedRole(role),
            SessionError::Forbidden(_) => PlantGuardError::Forbidden,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
