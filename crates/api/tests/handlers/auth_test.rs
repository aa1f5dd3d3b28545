use axum::Json;
use mockall::predicate;
use uuid::Uuid;
use wakesync_api::middleware::{auth, error_handling::AppError, session::SessionStore};
use wakesync_core::{
    errors::AlarmError,
    models::session::{LoginRequest, LoginResponse, RegisterRequest, SessionIdentity},
};

use crate::test_utils::{sample_db_user, TestContext};

// Test wrappers that replay the auth handler flow against mock
// repositories and a fresh in-process session store.

async fn test_register_wrapper(
    ctx: &TestContext,
    sessions: &SessionStore,
    payload: RegisterRequest,
) -> Result<Json<LoginResponse>, AppError> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(AppError(AlarmError::Validation(
            "Please enter both username and password".to_string(),
        )));
    }

    let existing = ctx
        .user_repo
        .get_user_by_username(username.to_string())
        .await
        .map_err(AlarmError::Database)?;
    if existing.is_some() {
        return Err(AppError(AlarmError::Validation(
            "Username already exists".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password).map_err(AlarmError::Database)?;

    let user = ctx
        .user_repo
        .create_user(username.to_string(), password_hash)
        .await
        .map_err(AlarmError::Database)?;

    ctx.user_repo
        .touch_last_login(user.id)
        .await
        .map_err(AlarmError::Database)?;

    let identity = SessionIdentity::authenticated(user.id, &user.username);
    let token = sessions.insert(identity).await;

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
        last_login: user.last_login,
    }))
}

async fn test_login_wrapper(
    ctx: &TestContext,
    sessions: &SessionStore,
    payload: LoginRequest,
) -> Result<Json<LoginResponse>, AppError> {
    let user = ctx
        .user_repo
        .verify_credentials(payload.username, payload.password)
        .await
        .map_err(AlarmError::Database)?
        .ok_or_else(|| AlarmError::Authentication("Failed to verify credentials".to_string()))?;

    ctx.user_repo
        .touch_last_login(user.id)
        .await
        .map_err(AlarmError::Database)?;

    let identity = SessionIdentity::authenticated(user.id, &user.username);
    let token = sessions.insert(identity).await;

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
        last_login: user.last_login,
    }))
}

#[tokio::test]
async fn test_register_success_opens_session() {
    let mut ctx = TestContext::new();
    let sessions = SessionStore::new();
    let user = sample_db_user("morning_person");
    let user_id = user.id;

    ctx.user_repo
        .expect_get_user_by_username()
        .with(predicate::eq("morning_person".to_string()))
        .returning(|_| Ok(None));
    let created = user.clone();
    ctx.user_repo
        .expect_create_user()
        .withf(|username, hash| username == "morning_person" && hash.starts_with("$argon2"))
        .returning(move |_, _| Ok(created.clone()));
    ctx.user_repo
        .expect_touch_last_login()
        .with(predicate::eq(user_id))
        .returning(|_| Ok(()));

    let payload = RegisterRequest {
        username: "morning_person".to_string(),
        password: "sunrise".to_string(),
    };
    let response = test_register_wrapper(&ctx, &sessions, payload)
        .await
        .unwrap();

    assert_eq!(response.0.user_id, user_id);
    assert_eq!(response.0.username, "morning_person");

    // The returned token resolves to an authenticated identity
    let identity = sessions.get(response.0.token).await.unwrap();
    assert!(identity.is_authenticated());
    assert_eq!(identity.user_id(), Some(user_id));
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let mut ctx = TestContext::new();
    let sessions = SessionStore::new();
    let existing = sample_db_user("morning_person");

    // Only the lookup runs; create_user has no expectation and would panic
    ctx.user_repo
        .expect_get_user_by_username()
        .returning(move |_| Ok(Some(existing.clone())));

    let payload = RegisterRequest {
        username: "morning_person".to_string(),
        password: "sunrise".to_string(),
    };
    let result = test_register_wrapper(&ctx, &sessions, payload).await;

    match result {
        Err(AppError(AlarmError::Validation(msg))) => {
            assert_eq!(msg, "Username already exists")
        }
        other => panic!("Expected validation error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_register_rejects_blank_credentials() {
    let ctx = TestContext::new();
    let sessions = SessionStore::new();

    for (username, password) in [("", "pw"), ("   ", "pw"), ("user", "")] {
        let payload = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let result = test_register_wrapper(&ctx, &sessions, payload).await;
        assert!(
            matches!(result, Err(AppError(AlarmError::Validation(_)))),
            "credentials ({:?}, {:?})",
            username,
            password
        );
    }
}

#[tokio::test]
async fn test_login_success() {
    let mut ctx = TestContext::new();
    let sessions = SessionStore::new();
    let user = sample_db_user("morning_person");
    let user_id = user.id;

    let verified = user.clone();
    ctx.user_repo
        .expect_verify_credentials()
        .with(
            predicate::eq("morning_person".to_string()),
            predicate::eq("sunrise".to_string()),
        )
        .returning(move |_, _| Ok(Some(verified.clone())));
    ctx.user_repo
        .expect_touch_last_login()
        .with(predicate::eq(user_id))
        .returning(|_| Ok(()));

    let payload = LoginRequest {
        username: "morning_person".to_string(),
        password: "sunrise".to_string(),
    };
    let response = test_login_wrapper(&ctx, &sessions, payload).await.unwrap();

    assert_eq!(response.0.user_id, user_id);
    assert!(sessions.get(response.0.token).await.is_some());
}

#[tokio::test]
async fn test_login_failure_message_is_generic() {
    let mut ctx = TestContext::new();
    let sessions = SessionStore::new();

    // Unknown user and wrong password are indistinguishable to the caller
    ctx.user_repo
        .expect_verify_credentials()
        .returning(|_, _| Ok(None));

    for password in ["wrong", "also-wrong"] {
        let payload = LoginRequest {
            username: "morning_person".to_string(),
            password: password.to_string(),
        };
        let result = test_login_wrapper(&ctx, &sessions, payload).await;

        match result {
            Err(AppError(AlarmError::Authentication(msg))) => {
                assert_eq!(msg, "Failed to verify credentials")
            }
            other => panic!("Expected authentication error, got {:?}", other.map(|_| ())),
        }
    }
}

#[tokio::test]
async fn test_logout_removes_session() {
    let sessions = SessionStore::new();
    let identity = SessionIdentity::authenticated(Uuid::new_v4(), "morning_person");
    let token = sessions.insert(identity).await;

    assert!(sessions.remove(token).await);
    assert!(sessions.get(token).await.is_none());

    // A second logout with the same token is a no-op
    assert!(!sessions.remove(token).await);
}

#[tokio::test]
async fn test_unknown_token_resolves_to_nothing() {
    let sessions = SessionStore::new();
    assert!(sessions.get(Uuid::new_v4()).await.is_none());
}
