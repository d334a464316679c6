use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashFailed(String),

    #[error("Stored credential is not a valid PHC string")]
    MalformedHash,
}
