use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use files_manager::api::v1::{TOKEN_HEADER, recover_error, routes};
use files_manager::application_impl::*;
use files_manager::domain_model::Collection;
use files_manager::infra_memory::*;
use files_manager::server::Server;
use serde_json::{Value, json};
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;

struct Fixture {
    cache: Arc<MemoryCacheStore>,
    documents: Arc<MemoryDocumentStore>,
    server: Arc<Server>,
}

fn fixture() -> Fixture {
    let cache = Arc::new(MemoryCacheStore::new(Arc::new(SystemClock)));
    let documents = Arc::new(MemoryDocumentStore::new());
    let server = Arc::new(Server::new(
        Arc::new(FakeAuthGate::new()),
        Arc::new(RealSessionService::new(cache.clone())),
        Arc::new(RealStatusService::new(cache.clone(), documents.clone())),
    ));
    Fixture {
        cache,
        documents,
        server,
    }
}

fn basic(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", email, password)))
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn connect_me_disconnect() {
    let f = fixture();
    let api = routes(f.server.clone()).recover(recover_error);

    let res = warp::test::request()
        .path("/connect")
        .header("authorization", basic("bob@dylan.com", "toto1234!"))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    let token = body["myToken"].as_str().unwrap().to_owned();
    assert!(uuid::Uuid::parse_str(&token).is_ok());

    let res = warp::test::request()
        .path("/users/me")
        .header(TOKEN_HEADER, &token)
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_json(res.body())["id"].is_string());

    let res = warp::test::request()
        .path("/disconnect")
        .header(TOKEN_HEADER, &token)
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.body().is_empty());

    let res = warp::test::request()
        .path("/users/me")
        .header(TOKEN_HEADER, &token)
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res.body()), json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn connect_requires_credentials() {
    let f = fixture();
    let api = routes(f.server.clone()).recover(recover_error);

    let res = warp::test::request().path("/connect").reply(&api).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = warp::test::request()
        .path("/connect")
        .header("authorization", "Basic not-base64")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = warp::test::request()
        .path("/connect")
        .header("authorization", basic("bob@dylan.com", ""))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn disconnect_always_answers_no_content() {
    let f = fixture();
    let api = routes(f.server.clone()).recover(recover_error);

    let res = warp::test::request().path("/disconnect").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    for _ in 0..2 {
        let res = warp::test::request()
            .path("/disconnect")
            .header(TOKEN_HEADER, "never-issued")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn status_and_stats() {
    let f = fixture();
    let api = routes(f.server.clone()).recover(recover_error);
    f.documents.insert(Collection::Users, json!({ "email": "bob@dylan.com" }));
    f.documents.insert(Collection::Files, json!({ "name": "a.png" }));
    f.documents.insert(Collection::Files, json!({ "name": "b.png" }));

    let res = warp::test::request().path("/status").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body()), json!({ "redis": true, "db": true }));

    let res = warp::test::request().path("/stats").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body()), json!({ "users": 1, "files": 2 }));
}

#[tokio::test]
async fn store_outage_maps_to_service_unavailable() {
    let f = fixture();
    let api = routes(f.server.clone()).recover(recover_error);
    f.cache.disconnect();
    f.documents.disconnect();

    let res = warp::test::request()
        .path("/connect")
        .header("authorization", basic("bob@dylan.com", "toto1234!"))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let res = warp::test::request().path("/stats").reply(&api).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let res = warp::test::request()
        .path("/disconnect")
        .header(TOKEN_HEADER, "anything")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let f = fixture();
    let api = routes(f.server.clone()).recover(recover_error);

    let res = warp::test::request().path("/files").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
