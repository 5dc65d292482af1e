use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{PhoneNumber, TypeConstraintError, UserEmail, UserId, UserName};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub name: String,
    pub profile: Option<String>,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub name: &'a str,
    pub profile: Option<&'a str>,
    pub email: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
    pub status: &'static str,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(user.id)?,
            name: UserName::new(user.name)?,
            profile: user.profile,
            email: UserEmail::new(user.email)?,
            phone: PhoneNumber::new(user.phone)?,
            status: user.status.parse()?,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            name: user.name.as_str(),
            profile: user.profile.as_deref(),
            email: user.email.as_str(),
            phone: user.phone.as_str(),
            password_hash: user.password.as_str(),
            status: user.status.as_str(),
        }
    }
}
