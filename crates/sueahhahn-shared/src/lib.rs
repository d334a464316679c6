//! Types shared by the store and the client: identifiers, constants,
//! credential hashing and the errors they produce.

pub mod constants;
pub mod credential;
pub mod error;
pub mod types;
