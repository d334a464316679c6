use sueahhahn_shared::error::CredentialError;
use sueahhahn_store::StoreError;
use thiserror::Error;

/// Errors surfaced to the presentation layer by the command handlers.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not allowed: {0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
