//! User service unit tests.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use placez::domain::{Password, User};
use placez::errors::AppError;
use placez::infra::{MockUnitOfWork, MockUserRepository, UserRepository};
use placez::services::{MockTokenService, UserManager, UserService};

fn test_user(email: &str, password_hash: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        image_path: "uploads/images/test.png".to_string(),
        place_ids: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn uow_with_users(repo: MockUserRepository) -> MockUnitOfWork {
    let repo: Arc<dyn UserRepository> = Arc::new(repo);
    let mut uow = MockUnitOfWork::new();
    uow.expect_users().returning(move || repo.clone());
    uow
}

fn issuing_tokens(token: &'static str) -> MockTokenService {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .returning(move |_, _| Ok(token.to_string()));
    tokens
}

#[tokio::test]
async fn register_rejects_duplicate_email_and_writes_nothing() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email == "jane@example.com")
        .returning(|email| Ok(Some(test_user(email, "hash"))));
    repo.expect_create().times(0);

    let service = UserManager::new(
        Arc::new(uow_with_users(repo)),
        Arc::new(MockTokenService::new()),
    );

    let result = service
        .register(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "password123".to_string(),
            "uploads/images/jane.png".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn register_persists_user_and_issues_token() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_create().returning(Ok);

    let service = UserManager::new(
        Arc::new(uow_with_users(repo)),
        Arc::new(issuing_tokens("signed-token")),
    );

    let session = service
        .register(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "password123".to_string(),
            "uploads/images/jane.png".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(session.email, "jane@example.com");
    assert_eq!(session.token, "signed-token");
}

#[tokio::test]
async fn register_rejects_short_passwords_before_any_write() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_create().times(0);

    let service = UserManager::new(
        Arc::new(uow_with_users(repo)),
        Arc::new(MockTokenService::new()),
    );

    let result = service
        .register(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "pw".to_string(),
            "uploads/images/jane.png".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn login_fails_the_same_way_for_unknown_email_and_wrong_password() {
    // Unknown email
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    let service = UserManager::new(
        Arc::new(uow_with_users(repo)),
        Arc::new(MockTokenService::new()),
    );
    let unknown_email_err = service
        .login("nobody@example.com".to_string(), "whatever123".to_string())
        .await
        .unwrap_err();

    // Known email, wrong password
    let hash = Password::new("correct-password").unwrap().into_string();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .returning(move |email| Ok(Some(test_user(email, &hash))));
    let service = UserManager::new(
        Arc::new(uow_with_users(repo)),
        Arc::new(MockTokenService::new()),
    );
    let wrong_password_err = service
        .login("jane@example.com".to_string(), "wrong-password".to_string())
        .await
        .unwrap_err();

    // Same kind, same message; no enumeration signal
    assert!(matches!(unknown_email_err, AppError::InvalidCredentials));
    assert!(matches!(wrong_password_err, AppError::InvalidCredentials));
    assert_eq!(unknown_email_err.to_string(), wrong_password_err.to_string());
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials() {
    let hash = Password::new("correct-password").unwrap().into_string();
    let user = test_user("jane@example.com", &hash);
    let user_id = user.id;

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .returning(move |_| Ok(Some(user.clone())));

    let service = UserManager::new(
        Arc::new(uow_with_users(repo)),
        Arc::new(issuing_tokens("signed-token")),
    );

    let session = service
        .login("jane@example.com".to_string(), "correct-password".to_string())
        .await
        .unwrap();

    assert_eq!(session.user_id, user_id);
    assert_eq!(session.token, "signed-token");
}

#[tokio::test]
async fn list_users_returns_all_users() {
    let mut repo = MockUserRepository::new();
    repo.expect_list().returning(|| {
        Ok(vec![
            test_user("one@example.com", "hash"),
            test_user("two@example.com", "hash"),
        ])
    });

    let service = UserManager::new(
        Arc::new(uow_with_users(repo)),
        Arc::new(MockTokenService::new()),
    );

    let users = service.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
}
