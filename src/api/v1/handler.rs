use super::error::*;
use crate::application_port::*;
use crate::domain_model::*;
use crate::logger::*;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{self, reject};

pub async fn status(
    status_service: Arc<dyn StatusService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&status_service.status()))
}

pub async fn stats(
    status_service: Arc<dyn StatusService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let stats = status_service
        .stats()
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&stats))
}

#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    #[serde(rename = "myToken")]
    pub my_token: SessionToken,
}

pub async fn connect(
    authorization: Option<String>,
    auth_gate: Arc<dyn AuthGate>,
    session_service: Arc<dyn SessionService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let credentials = authorization
        .ok_or(AuthError::MissingCredentials)
        .and_then(|header| parse_basic(&header).ok_or(AuthError::InvalidCredentials))
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let user_id = auth_gate
        .authenticate(&credentials)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let my_token = session_service
        .issue_token(&user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ConnectResponse { my_token }))
}

/// Always answers 204; revoking an unknown token or sending none at all is
/// not an error.
pub async fn disconnect(
    token: Option<String>,
    session_service: Arc<dyn SessionService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match token {
        Some(token) => session_service
            .revoke_token(&SessionToken(token))
            .await
            .map_err(ApiErrorCode::from)
            .map_err(reject::custom)?,
        None => debug!("disconnect without token"),
    }

    Ok(warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT))
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: UserId,
}

pub async fn me(user_id: UserId) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&MeResponse { id: user_id }))
}

/// Decode `Basic base64(email:password)`. The password may contain ':'.
fn parse_basic(header: &str) -> Option<Credentials> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some(Credentials {
        email: email.to_owned(),
        password: password.to_owned(),
    })
}
