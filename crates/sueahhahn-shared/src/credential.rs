use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ARGON2_DEFAULT_MEMORY_KIB, ARGON2_DEFAULT_PARALLELISM, ARGON2_DEFAULT_TIME_COST,
};
use crate::error::CredentialError;

/// Cost parameters used when hashing new passwords.
///
/// Verification reads the parameters embedded in the stored hash, so
/// changing these only affects credentials created afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialConfig {
    pub memory_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            memory_kib: ARGON2_DEFAULT_MEMORY_KIB,
            time_cost: ARGON2_DEFAULT_TIME_COST,
            parallelism: ARGON2_DEFAULT_PARALLELISM,
        }
    }
}

impl CredentialConfig {
    fn hasher(&self) -> Result<Argon2<'static>, CredentialError> {
        let params = Params::new(self.memory_kib, self.time_cost, self.parallelism, None)
            .map_err(|e| CredentialError::InvalidParams(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// One-way password credential, stored as an Argon2id PHC string.
///
/// The plaintext password never leaves [`Credential::hash`].
/// Deserialization goes through [`Credential::from_phc`], so a stored
/// plaintext password is rejected on load.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Credential(String);

impl Credential {
    pub fn hash(password: &str, config: &CredentialConfig) -> Result<Self, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = config
            .hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::HashFailed(e.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap an already-hashed PHC string (e.g. read back from storage).
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, CredentialError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|_| CredentialError::MalformedHash)?;
        Ok(Self(phc))
    }

    /// Constant-time check of `password` against the stored hash.
    /// A malformed stored hash never verifies.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Credential {
    type Error = CredentialError;

    fn try_from(phc: String) -> Result<Self, Self::Error> {
        Self::from_phc(phc)
    }
}

impl From<Credential> for String {
    fn from(credential: Credential) -> Self {
        credential.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
