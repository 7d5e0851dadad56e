//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::RwLock;

use chirpy_auth::{MemoryRefreshTokenStore, PasswordHasher, SessionManager};
use chirpy_core::config::AuthConfig;
use chirpy_core::error::AppError;
use chirpy_core::traits::{Clock, ManualClock, UserRepository};
use chirpy_core::types::{UserCredentials, UserId};

/// Secret shared by every test application.
pub const TEST_SECRET: &str = "integration-secret";

/// In-memory user table keyed by email.
#[derive(Default)]
pub struct MemoryUsers {
    users: RwLock<HashMap<String, UserCredentials>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        Ok(self.users.read().await.get(email).cloned())
    }
}

/// Test application context
pub struct TestApp {
    /// Fully wired session manager
    pub sessions: SessionManager,
    /// Clock shared by every component
    pub clock: ManualClock,
    /// Refresh token store, for direct inspection
    pub refresh_store: MemoryRefreshTokenStore,
    users: Arc<MemoryUsers>,
    hasher: PasswordHasher,
}

impl TestApp {
    /// Create a new test application with cheap hashing parameters
    pub fn new() -> Self {
        let mut config = AuthConfig::with_secret(TEST_SECRET);
        config.password_memory_kib = 64;
        config.password_iterations = 1;

        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        let users = Arc::new(MemoryUsers::default());
        let refresh_store = MemoryRefreshTokenStore::new();
        let hasher = PasswordHasher::from_config(&config).expect("Failed to build hasher");

        let sessions = SessionManager::from_config(
            config,
            users.clone(),
            Arc::new(refresh_store.clone()),
            Arc::new(clock.clone()),
        )
        .expect("Failed to build session manager");

        Self {
            sessions,
            clock,
            refresh_store,
            users,
            hasher,
        }
    }

    /// Register a user and return its ID
    pub async fn create_test_user(&self, email: &str, password: &str) -> UserId {
        let now = self.clock.now();
        let user = UserCredentials {
            id: UserId::new(),
            email: email.to_string(),
            hashed_password: self
                .hasher
                .hash_password(password)
                .expect("Failed to hash password"),
            created_at: now,
            updated_at: now,
        };
        let id = user.id;
        self.users.users.write().await.insert(email.to_string(), user);
        id
    }
}

/// Build an `Authorization` header value
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
