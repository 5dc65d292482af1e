use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::status::Status;
use crate::domain::types::{PhoneNumber, UserEmail, UserName};
use crate::domain::user::{NewUser, HashedPassword};
use crate::forms::FormError;

/// Minimum password length accepted on account creation.
pub const MIN_PASSWORD_LENGTH: u64 = 8;

#[derive(MultipartForm)]
/// Multipart body of the user creation screen.
pub struct CreateUserForm {
    pub name: Text<String>,
    pub email: Text<String>,
    pub phone: Text<String>,
    pub password: Text<String>,
    pub confirm_password: Text<String>,
    #[multipart(limit = "5MB")]
    pub profile: Option<TempFile>,
}

#[derive(Debug, Deserialize, Validate)]
/// Text fields of [`CreateUserForm`], validated before hashing.
pub struct CreateUserPayload {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(
        length(min = MIN_PASSWORD_LENGTH),
        custom(function = "validate_password_chars")
    )]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
}

/// Passwords must contain at least one character that is neither a letter
/// nor a digit.
fn validate_password_chars(password: &str) -> Result<(), ValidationError> {
    if password.chars().any(|c| !c.is_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("password_special_char"))
    }
}

impl CreateUserForm {
    /// Splits the text payload from the optional profile upload.
    pub fn into_parts(self) -> (CreateUserPayload, Option<TempFile>) {
        let payload = CreateUserPayload {
            name: self.name.into_inner(),
            email: self.email.into_inner(),
            phone: self.phone.into_inner(),
            password: self.password.into_inner(),
            confirm_password: self.confirm_password.into_inner(),
        };
        (payload, self.profile)
    }
}

impl CreateUserPayload {
    /// Validates the payload and builds the domain value with a hashed
    /// password. `profile` is the stored profile image name.
    pub fn into_new_user(self, profile: Option<String>) -> Result<NewUser, FormError> {
        self.validate()?;
        Ok(NewUser {
            name: UserName::new(self.name)?,
            profile,
            email: UserEmail::new(self.email)?,
            phone: PhoneNumber::new(self.phone)?,
            password: HashedPassword::new(&self.password)?,
            status: Status::Active,
        })
    }
}
