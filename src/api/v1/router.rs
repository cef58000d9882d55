use super::error::*;
use super::handler;
use crate::application_port::*;
use crate::domain_model::*;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http, reject};

pub const TOKEN_HEADER: &str = "x-token";

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let status = warp::get()
        .and(warp::path("status"))
        .and(warp::path::end())
        .and(with(server.status_service.clone()))
        .and_then(handler::status);

    let stats = warp::get()
        .and(warp::path("stats"))
        .and(warp::path::end())
        .and(with(server.status_service.clone()))
        .and_then(handler::stats);

    let connect = warp::get()
        .and(warp::path("connect"))
        .and(warp::path::end())
        .and(warp::header::optional::<String>(
            http::header::AUTHORIZATION.as_ref(),
        ))
        .and(with(server.auth_gate.clone()))
        .and(with(server.session_service.clone()))
        .and_then(handler::connect);

    let disconnect = warp::get()
        .and(warp::path("disconnect"))
        .and(warp::path::end())
        .and(warp::header::optional::<String>(TOKEN_HEADER))
        .and(with(server.session_service.clone()))
        .and_then(handler::disconnect);

    let me = warp::get()
        .and(warp::path("users"))
        .and(warp::path("me"))
        .and(warp::path::end())
        .and(with_session(server.session_service.clone()))
        .and_then(handler::me);

    status.or(stats).or(connect).or(disconnect).or(me)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn with_session(
    session_service: Arc<dyn SessionService>,
) -> impl Filter<Extract = (UserId,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>(TOKEN_HEADER).and_then(move |token: Option<String>| {
        let session_service = session_service.clone();
        async move {
            let Some(token) = token else {
                return Err(reject::custom(ApiErrorCode::Unauthorized));
            };
            session_service
                .resolve_token(&SessionToken(token))
                .await
                .map_err(ApiErrorCode::from)
                .map_err(reject::custom)?
                .ok_or_else(|| reject::custom(ApiErrorCode::Unauthorized))
        }
    })
}
