use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString};
#[cfg(test)]
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::Status;
use crate::domain::types::{PhoneNumber, TypeConstraintError, UserEmail, UserId, UserName};

/// Dashboard account. Credentials never leave the repository layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    /// Image name of the profile picture.
    pub profile: Option<String>,
    pub email: UserEmail,
    pub phone: PhoneNumber,
    pub status: Status,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Argon2id hash of a password, stored as a PHC string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hashes `password` with a fresh random salt.
    pub fn new(password: &str) -> Result<Self, TypeConstraintError> {
        let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
            .map_err(|err| TypeConstraintError::InvalidValue(format!("password salt: {err}")))?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| TypeConstraintError::InvalidValue(format!("password hash: {err}")))?;
        Ok(Self(hash.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `password` matches the stored hash.
    #[cfg(test)]
    pub fn verify(&self, password: &str) -> bool {
        PasswordHash::new(&self.0)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Validated payload for creating a user.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub name: UserName,
    pub profile: Option<String>,
    pub email: UserEmail,
    pub phone: PhoneNumber,
    pub password: HashedPassword,
    pub status: Status,
}
