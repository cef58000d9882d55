use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

/// Every session key carries this prefix; the cache is shared with other
/// subsystems and unprefixed keys are never treated as sessions.
const KEY_PREFIX: &str = "auth_";

pub struct RealSessionService {
    cache: Arc<dyn CacheStore>,
}

impl RealSessionService {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        RealSessionService { cache }
    }

    fn key(&self, token: &SessionToken) -> String {
        format!("{}{}", KEY_PREFIX, token)
    }
}

#[async_trait::async_trait]
impl SessionService for RealSessionService {
    async fn issue_token(&self, user_id: &UserId) -> Result<SessionToken, StoreError> {
        // Uniqueness rests on the generator; existing keys are not checked.
        let token = SessionToken::generate();
        self.cache
            .set_with_expiry(&self.key(&token), user_id.as_str(), SESSION_TTL_SECS)
            .await?;
        debug!(%user_id, "session issued");
        Ok(token)
    }

    async fn revoke_token(&self, token: &SessionToken) -> Result<(), StoreError> {
        self.cache.delete(&self.key(token)).await?;
        debug!("session revoked");
        Ok(())
    }

    async fn resolve_token(&self, token: &SessionToken) -> Result<Option<UserId>, StoreError> {
        let user_id = self.cache.get(&self.key(token)).await?;
        Ok(user_id.map(UserId))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra_memory::*;
    use chrono::Utc;

    fn service() -> (Arc<MemoryCacheStore>, RealSessionService) {
        let cache = Arc::new(MemoryCacheStore::new(Arc::new(ManualClock::new(Utc::now()))));
        let service = RealSessionService::new(cache.clone());
        (cache, service)
    }

    #[tokio::test]
    async fn issued_token_resolves_to_its_user() {
        let (_, service) = service();
        let user = UserId::from("5f1e7d0c9b1e8a0012345678");

        let token = service.issue_token(&user).await.unwrap();

        assert_eq!(service.resolve_token(&token).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn token_is_stored_under_prefixed_key() {
        let (cache, service) = service();
        let token = service.issue_token(&UserId::from("user123")).await.unwrap();

        let key = format!("auth_{}", token);
        assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("user123"));
        assert_eq!(cache.get(token.as_str()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn one_user_may_hold_several_sessions() {
        let (_, service) = service();
        let user = UserId::from("u1");

        let first = service.issue_token(&user).await.unwrap();
        let second = service.issue_token(&user).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(service.resolve_token(&first).await.unwrap(), Some(user.clone()));
        assert_eq!(service.resolve_token(&second).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn revoke_only_touches_its_own_session() {
        let (_, service) = service();
        let user = UserId::from("u1");
        let kept = service.issue_token(&user).await.unwrap();
        let dropped = service.issue_token(&user).await.unwrap();

        service.revoke_token(&dropped).await.unwrap();

        assert_eq!(service.resolve_token(&dropped).await.unwrap(), None);
        assert_eq!(service.resolve_token(&kept).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn store_failure_surfaces_unchanged() {
        let (cache, service) = service();
        let token = service.issue_token(&UserId::from("u1")).await.unwrap();
        cache.disconnect();

        let issue = service.issue_token(&UserId::from("u1")).await.unwrap_err();
        let resolve = service.resolve_token(&token).await.unwrap_err();
        let revoke = service.revoke_token(&token).await.unwrap_err();

        assert!(issue.is_unavailable());
        assert!(resolve.is_unavailable());
        assert!(revoke.is_unavailable());
    }
}
