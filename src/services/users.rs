//! User account creation.

use crate::domain::user::User;
use crate::forms::users::CreateUserForm;
use crate::repository::{UserReader, UserWriter};
use crate::services::uploads::{discard_image, store_image};
use crate::services::{ServiceError, ServiceResult};

/// Validates the creation form, stores the profile picture and persists the
/// account with an Argon2 password hash.
pub fn create_user<R>(repo: &R, form: CreateUserForm, upload_dir: &str) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let (payload, profile) = form.into_parts();
    // Validate before touching the upload directory.
    let mut new_user = payload.into_new_user(None).map_err(|err| {
        log::error!("Failed to validate user form: {err}");
        err
    })?;

    if repo.get_user_by_email(&new_user.email)?.is_some() {
        return Err(ServiceError::Form(format!(
            "User with email {} already exists",
            new_user.email
        )));
    }

    new_user.profile = store_image(profile, upload_dir)?;

    let user = repo.create_user(&new_user).map_err(|err| {
        log::error!("Failed to create user: {err}");
        discard_image(new_user.profile.as_deref(), upload_dir);
        err
    })?;
    log::info!("Created user {}", user.id);

    Ok(user)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use actix_multipart::form::text::Text;
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::status::Status;
    use crate::domain::types::{PhoneNumber, UserEmail, UserId, UserName};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::uploads::test_upload;

    fn form(email: &str) -> CreateUserForm {
        CreateUserForm {
            name: Text("Jane".into()),
            email: Text(email.into()),
            phone: Text("+14155552671".into()),
            password: Text("s3cret!pass".into()),
            confirm_password: Text("s3cret!pass".into()),
            profile: None,
        }
    }

    fn stored_user() -> User {
        User {
            id: UserId::new(1).unwrap(),
            name: UserName::new("Jane").unwrap(),
            profile: None,
            email: UserEmail::new("jane@example.com").unwrap(),
            phone: PhoneNumber::new("+14155552671").unwrap(),
            status: Status::Active,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user())));
        repo.expect_create_user().times(0);

        let result = create_user(&repo, form("Jane@example.com"), "unused");
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn creates_user_with_hashed_password() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_create_user()
            .withf(|new_user| {
                new_user.email.as_str() == "jane@example.com"
                    && new_user.password.verify("s3cret!pass")
                    && new_user.profile.is_none()
            })
            .times(1)
            .returning(|_| Ok(stored_user()));

        let user = create_user(&repo, form("jane@example.com"), "unused").unwrap();
        assert_eq!(user.id.get(), 1);
    }

    #[test]
    fn invalid_form_never_reaches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email().times(0);
        repo.expect_create_user().times(0);

        let result = create_user(&repo, form("not-an-email"), "unused");
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn failed_insert_removes_the_stored_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_create_user()
            .withf(|new_user| new_user.profile.is_some())
            .times(1)
            .returning(|_| {
                Err(RepositoryError::ConstraintViolation(
                    "Unique constraint violation".into(),
                ))
            });

        let mut form = form("jane@example.com");
        form.profile = Some(test_upload("me.jpeg", b"jpeg"));
        let result = create_user(&repo, form, dir.path().to_str().unwrap());

        assert!(matches!(result, Err(ServiceError::Repository(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
