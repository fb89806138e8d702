//! Unit tests for [`AuthService`].

use chrono::Utc;
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockProfileRepository;
use crate::domain::ErrorCode;

fn profile_named(name: &str, role: Role) -> Profile {
    Profile {
        id: UserId::random(),
        email: EmailAddress::new(format!("{name}@example.com")).expect("valid email"),
        display_name: DisplayName::new(name).expect("valid name"),
        role,
        created_at: Utc::now(),
    }
}

#[rstest]
#[tokio::test]
async fn register_stores_a_student_profile() {
    let mut repo = MockProfileRepository::new();
    repo.expect_insert()
        .withf(|stored: &StoredProfile| {
            stored.profile.role == Role::Student && stored.password_hash.contains(':')
        })
        .times(1)
        .returning(|_| Ok(()));

    let service = AuthService::new(Arc::new(repo));
    let profile = service
        .register(RegisterRequest {
            email: "Ada@Example.com".to_owned(),
            password: "correct horse".to_owned(),
            display_name: "Ada".to_owned(),
        })
        .await
        .expect("register succeeds");

    assert_eq!(profile.email.as_ref(), "ada@example.com");
    assert_eq!(profile.role, Role::Student);
}

#[rstest]
#[case("not-an-email", "longenough", "Ada")]
#[case("ada@example.com", "short", "Ada")]
#[case("ada@example.com", "longenough", "")]
#[tokio::test]
async fn register_rejects_invalid_input(
    #[case] email: &str,
    #[case] password: &str,
    #[case] display_name: &str,
) {
    let mut repo = MockProfileRepository::new();
    repo.expect_insert().never();

    let service = AuthService::new(Arc::new(repo));
    let err = service
        .register(RegisterRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            display_name: display_name.to_owned(),
        })
        .await
        .expect_err("invalid input is rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn register_surfaces_duplicate_email_as_conflict() {
    let mut repo = MockProfileRepository::new();
    repo.expect_insert()
        .returning(|_| Err(crate::domain::ports::ProfileRepositoryError::DuplicateEmail));

    let service = AuthService::new(Arc::new(repo));
    let err = service
        .register(RegisterRequest {
            email: "ada@example.com".to_owned(),
            password: "correct horse".to_owned(),
            display_name: "Ada".to_owned(),
        })
        .await
        .expect_err("duplicate email is rejected");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn login_accepts_the_right_password() {
    let profile = profile_named("ada", Role::Student);
    let hash = PasswordHash::derive("correct horse").expect("derive");
    let stored = StoredProfile {
        profile: profile.clone(),
        password_hash: hash.as_str().to_owned(),
    };

    let mut repo = MockProfileRepository::new();
    let email = profile.email.clone();
    repo.expect_find_by_email()
        .with(eq(email))
        .returning(move |_| Ok(Some(stored.clone())));

    let service = AuthService::new(Arc::new(repo));
    let logged_in = service
        .login(LoginRequest {
            email: "ada@example.com".to_owned(),
            password: "correct horse".to_owned(),
        })
        .await
        .expect("login succeeds");

    assert_eq!(logged_in.id, profile.id);
}

#[rstest]
#[tokio::test]
async fn login_rejects_a_wrong_password() {
    let profile = profile_named("ada", Role::Student);
    let hash = PasswordHash::derive("correct horse").expect("derive");
    let stored = StoredProfile {
        profile,
        password_hash: hash.as_str().to_owned(),
    };

    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_email()
        .returning(move |_| Ok(Some(stored.clone())));

    let service = AuthService::new(Arc::new(repo));
    let err = service
        .login(LoginRequest {
            email: "ada@example.com".to_owned(),
            password: "battery staple".to_owned(),
        })
        .await
        .expect_err("wrong password is rejected");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn login_rejects_an_unknown_account() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));

    let service = AuthService::new(Arc::new(repo));
    let err = service
        .login(LoginRequest {
            email: "ghost@example.com".to_owned(),
            password: "anything at all".to_owned(),
        })
        .await
        .expect_err("unknown account is rejected");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn set_role_returns_the_updated_profile() {
    let mut updated = profile_named("ada", Role::Instructor);
    let id = updated.id;
    updated.role = Role::Instructor;

    let mut repo = MockProfileRepository::new();
    repo.expect_update_role()
        .with(eq(id), eq(Role::Instructor))
        .returning(|_, _| Ok(true));
    repo.expect_find_by_id()
        .with(eq(id))
        .returning(move |_| Ok(Some(updated.clone())));

    let service = AuthService::new(Arc::new(repo));
    let profile = service
        .set_role(id, Role::Instructor)
        .await
        .expect("role update succeeds");

    assert_eq!(profile.role, Role::Instructor);
}

#[rstest]
#[tokio::test]
async fn set_role_for_a_missing_user_is_not_found() {
    let mut repo = MockProfileRepository::new();
    repo.expect_update_role().returning(|_, _| Ok(false));

    let service = AuthService::new(Arc::new(repo));
    let err = service
        .set_role(UserId::random(), Role::Admin)
        .await
        .expect_err("missing user is an error");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
