//! Integration tests for the login, refresh, and revoke flow.

mod helpers;

use chrono::Duration;

use chirpy_auth::{AuthError, get_bearer_token, validate_jwt};
use chirpy_core::error::{AppError, ErrorKind};
use chirpy_core::types::RefreshTokenState;

use helpers::{TEST_SECRET, TestApp, bearer};

#[tokio::test]
async fn test_full_session_lifecycle() {
    let app = TestApp::new();
    let user_id = app.create_test_user("saul@bettercall.com", "s3cret").await;

    let login = app
        .sessions
        .login("saul@bettercall.com", "s3cret")
        .await
        .unwrap();
    assert_eq!(login.user.id, user_id);
    assert_eq!(
        app.sessions.authenticate(Some(&bearer(&login.token))).unwrap(),
        user_id
    );

    // A minute later the refresh token mints a distinct, independently valid token.
    app.clock.advance(Duration::minutes(1));
    let refresh_header = bearer(&login.refresh_token);
    let access = app.sessions.refresh(Some(&refresh_header)).await.unwrap();
    assert_ne!(access.token, login.token);
    assert_eq!(
        app.sessions.authenticate(Some(&bearer(&access.token))).unwrap(),
        user_id
    );

    app.sessions.revoke(Some(&refresh_header)).await.unwrap();

    let err = app.sessions.refresh(Some(&refresh_header)).await.unwrap_err();
    assert!(matches!(
        err,
        AuthError::RevokedOrExpired(RefreshTokenState::Revoked)
    ));
    assert_eq!(AppError::from(err).status_code(), 401);

    // Already-issued access tokens stay valid until they expire.
    assert_eq!(
        app.sessions.authenticate(Some(&bearer(&access.token))).unwrap(),
        user_id
    );
    assert_eq!(app.refresh_store.len(), 1);
}

#[tokio::test]
async fn test_each_login_gets_its_own_refresh_token() {
    let app = TestApp::new();
    app.create_test_user("jesse@example.com", "yo").await;

    let first = app.sessions.login("jesse@example.com", "yo").await.unwrap();
    let second = app.sessions.login("jesse@example.com", "yo").await.unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);
    assert_eq!(app.refresh_store.len(), 2);

    // Revoking one session leaves the other usable.
    app.sessions
        .revoke(Some(&bearer(&first.refresh_token)))
        .await
        .unwrap();
    assert!(
        app.sessions
            .refresh(Some(&bearer(&second.refresh_token)))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.create_test_user("kim@example.com", "right").await;

    let err = app.sessions.login("kim@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::CredentialMismatch));

    let app_err = AppError::from(err);
    assert_eq!(app_err.kind, ErrorKind::Authentication);
    assert_eq!(app_err.status_code(), 401);
    assert!(app.refresh_store.is_empty());
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new();

    let err = app.sessions.login("ghost@example.com", "x").await.unwrap_err();
    assert!(matches!(err, AuthError::UnknownUser(_)));
    assert_eq!(AppError::from(err).status_code(), 404);
}

#[tokio::test]
async fn test_revoke_unknown_token_succeeds() {
    let app = TestApp::new();
    app.sessions
        .revoke(Some(&bearer("0000000000000000")))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_access_token_expires_after_one_hour() {
    let app = TestApp::new();
    app.create_test_user("mike@example.com", "halfmeasures").await;
    let login = app
        .sessions
        .login("mike@example.com", "halfmeasures")
        .await
        .unwrap();
    let header = bearer(&login.token);

    app.clock.advance(Duration::minutes(59) + Duration::seconds(59));
    assert!(app.sessions.authenticate(Some(&header)).is_ok());

    app.clock.advance(Duration::seconds(1));
    assert!(matches!(
        app.sessions.authenticate(Some(&header)),
        Err(AuthError::Expired)
    ));
}

#[tokio::test]
async fn test_refresh_token_expires_after_sixty_days() {
    let app = TestApp::new();
    app.create_test_user("gus@example.com", "chicken").await;
    let login = app.sessions.login("gus@example.com", "chicken").await.unwrap();
    let header = bearer(&login.refresh_token);

    app.clock.advance(Duration::days(60));
    assert!(app.sessions.refresh(Some(&header)).await.is_ok());

    app.clock.advance(Duration::seconds(1));
    assert!(matches!(
        app.sessions.refresh(Some(&header)).await,
        Err(AuthError::RevokedOrExpired(RefreshTokenState::Expired))
    ));
}

#[tokio::test]
async fn test_access_token_is_not_a_refresh_token() {
    let app = TestApp::new();
    app.create_test_user("hank@example.com", "minerals").await;
    let login = app
        .sessions
        .login("hank@example.com", "minerals")
        .await
        .unwrap();

    assert!(matches!(
        app.sessions.refresh(Some(&bearer(&login.token))).await,
        Err(AuthError::UnknownRefreshToken)
    ));
}

#[test]
fn test_free_functions_share_the_header_contract() {
    let header = "Bearer abc.def.ghi";
    let token = get_bearer_token(Some(header)).unwrap();
    assert!(matches!(
        validate_jwt(token, TEST_SECRET),
        Err(AuthError::Malformed(_))
    ));
}
