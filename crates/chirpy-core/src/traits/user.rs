//! Lookup contract for user credentials.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::user::UserCredentials;

/// Read access to stored users for credential verification.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find a user by login email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>>;
}
