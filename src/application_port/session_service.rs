use crate::domain_model::*;
use crate::domain_port::StoreError;

/// Lifetime of a session in the cache store.
pub const SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Issue, resolve and revoke session tokens.
///
/// Each operation is exactly one cache round-trip. Store failures are
/// returned as-is; nothing here retries.
#[async_trait::async_trait]
pub trait SessionService: Send + Sync {
    async fn issue_token(&self, user_id: &UserId) -> Result<SessionToken, StoreError>;

    /// Succeeds whether or not `token` was ever valid.
    async fn revoke_token(&self, token: &SessionToken) -> Result<(), StoreError>;

    /// `None` when the token is unknown, revoked or expired.
    async fn resolve_token(&self, token: &SessionToken) -> Result<Option<UserId>, StoreError>;
}
