use crate::domain_model::UserId;
use crate::domain_port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Turns presented credentials into the identity a session is issued for.
#[async_trait::async_trait]
pub trait AuthGate: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, AuthError>;
}
