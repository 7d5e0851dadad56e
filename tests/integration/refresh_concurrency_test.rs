//! Integration tests for concurrent refresh and revoke.

mod helpers;

use std::sync::Arc;

use chirpy_auth::AuthError;
use chirpy_core::types::RefreshTokenState;

use helpers::{TestApp, bearer};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refreshes_all_succeed() {
    let app = Arc::new(TestApp::new());
    app.create_test_user("lydia@example.com", "stevia").await;
    let login = app
        .sessions
        .login("lydia@example.com", "stevia")
        .await
        .unwrap();
    let header = bearer(&login.refresh_token);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let app = app.clone();
        let header = header.clone();
        handles.push(tokio::spawn(async move {
            app.sessions.refresh(Some(&header)).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_refresh_after_revoke_always_fails() {
    let app = Arc::new(TestApp::new());
    app.create_test_user("todd@example.com", "tarantula").await;
    let login = app
        .sessions
        .login("todd@example.com", "tarantula")
        .await
        .unwrap();
    let header = bearer(&login.refresh_token);

    // Refreshes racing the revoke may land on either side of it.
    let mut racing = Vec::new();
    for _ in 0..16 {
        let app = app.clone();
        let header = header.clone();
        racing.push(tokio::spawn(async move {
            app.sessions.refresh(Some(&header)).await
        }));
    }

    app.sessions.revoke(Some(&header)).await.unwrap();

    for handle in racing {
        match handle.await.unwrap() {
            Ok(_) | Err(AuthError::RevokedOrExpired(RefreshTokenState::Revoked)) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    // Everything that starts after the revoke returned must observe it.
    let mut after = Vec::new();
    for _ in 0..16 {
        let app = app.clone();
        let header = header.clone();
        after.push(tokio::spawn(async move {
            app.sessions.refresh(Some(&header)).await
        }));
    }

    for handle in after {
        assert!(matches!(
            handle.await.unwrap(),
            Err(AuthError::RevokedOrExpired(RefreshTokenState::Revoked))
        ));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_revokes_are_idempotent() {
    let app = Arc::new(TestApp::new());
    app.create_test_user("skyler@example.com", "carwash").await;
    let login = app
        .sessions
        .login("skyler@example.com", "carwash")
        .await
        .unwrap();
    let header = bearer(&login.refresh_token);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        let header = header.clone();
        handles.push(tokio::spawn(async move {
            app.sessions.revoke(Some(&header)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(app.refresh_store.len(), 1);
    assert!(matches!(
        app.sessions.refresh(Some(&header)).await,
        Err(AuthError::RevokedOrExpired(RefreshTokenState::Revoked))
    ));
}
