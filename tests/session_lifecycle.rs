use chrono::{TimeDelta, Utc};
use files_manager::application_impl::*;
use files_manager::application_port::*;
use files_manager::domain_model::*;
use files_manager::domain_port::*;
use files_manager::infra_memory::*;
use std::sync::Arc;

struct Fixture {
    clock: Arc<ManualClock>,
    cache: Arc<MemoryCacheStore>,
    sessions: RealSessionService,
}

fn fixture() -> Fixture {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let cache = Arc::new(MemoryCacheStore::new(clock.clone()));
    let sessions = RealSessionService::new(cache.clone());
    Fixture {
        clock,
        cache,
        sessions,
    }
}

#[tokio::test]
async fn issue_stores_user_under_auth_key_for_a_day() {
    let f = fixture();
    let documents = MemoryDocumentStore::new();

    let token = f.sessions.issue_token(&UserId::from("user123")).await.unwrap();

    assert!(uuid::Uuid::parse_str(token.as_str()).is_ok());
    let key = format!("auth_{}", token);
    assert_eq!(f.cache.get(&key).await.unwrap().as_deref(), Some("user123"));
    assert_eq!(f.cache.ttl(&key), Some(TimeDelta::seconds(86400)));
    assert_eq!(documents.count_documents(Collection::Users).await.unwrap(), 0);
}

#[tokio::test]
async fn token_lives_exactly_one_day() {
    let f = fixture();
    let user = UserId::from("user123");
    let token = f.sessions.issue_token(&user).await.unwrap();

    f.clock.advance(TimeDelta::seconds(86399));
    assert_eq!(f.sessions.resolve_token(&token).await.unwrap(), Some(user));

    f.clock.advance(TimeDelta::seconds(2));
    assert_eq!(f.sessions.resolve_token(&token).await.unwrap(), None);
}

#[tokio::test]
async fn revoked_and_expired_look_the_same() {
    let f = fixture();
    let user = UserId::from("u1");
    let revoked = f.sessions.issue_token(&user).await.unwrap();
    let expired = f.sessions.issue_token(&user).await.unwrap();

    f.sessions.revoke_token(&revoked).await.unwrap();
    f.clock.advance(TimeDelta::days(2));

    assert_eq!(f.sessions.resolve_token(&revoked).await.unwrap(), None);
    assert_eq!(f.sessions.resolve_token(&expired).await.unwrap(), None);
}

#[tokio::test]
async fn revoking_unknown_tokens_succeeds_twice() {
    let f = fixture();
    let never_issued = SessionToken::from("00000000-0000-0000-0000-000000000000");

    f.sessions.revoke_token(&never_issued).await.unwrap();
    f.sessions.revoke_token(&never_issued).await.unwrap();

    assert_eq!(f.sessions.resolve_token(&never_issued).await.unwrap(), None);
}

#[tokio::test]
async fn revoking_an_expired_token_succeeds() {
    let f = fixture();
    let token = f.sessions.issue_token(&UserId::from("u1")).await.unwrap();
    f.clock.advance(TimeDelta::seconds(86401));

    f.sessions.revoke_token(&token).await.unwrap();
}

#[tokio::test]
async fn unprefixed_keys_are_never_sessions() {
    let f = fixture();
    let token = SessionToken::generate();
    f.cache
        .set_with_expiry(token.as_str(), "intruder", 60)
        .await
        .unwrap();
    f.cache
        .set_with_expiry(&format!("files_{}", token), "intruder", 60)
        .await
        .unwrap();

    assert_eq!(f.sessions.resolve_token(&token).await.unwrap(), None);
}

#[tokio::test]
async fn liveness_follows_connection_events() {
    let f = fixture();
    let mut liveness = f.cache.liveness();
    assert!(f.cache.is_alive());

    f.cache.disconnect();
    assert!(liveness.wait_for(false).await);
    assert!(!f.cache.is_alive());

    f.cache.reconnect();
    assert!(liveness.wait_for(true).await);
    assert!(f.cache.is_alive());
}

#[tokio::test]
async fn outage_reaches_the_caller_unchanged() {
    let f = fixture();
    f.cache.disconnect();

    let err = f
        .sessions
        .issue_token(&UserId::from("u1"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));

    f.cache.reconnect();
    let token = f.sessions.issue_token(&UserId::from("u1")).await.unwrap();
    assert!(f.sessions.resolve_token(&token).await.unwrap().is_some());
}
