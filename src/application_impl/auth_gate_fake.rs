use crate::application_port::*;
use crate::domain_model::UserId;

/// Accepts any non-empty email and password.
///
/// The user id is derived from the email, so the same email always maps to
/// the same identity across logins.
#[derive(Debug, Default)]
pub struct FakeAuthGate;

impl FakeAuthGate {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl AuthGate for FakeAuthGate {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, AuthError> {
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(get_fake_id(&credentials.email))
    }
}

fn get_fake_id(email: &str) -> UserId {
    let id = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, email.as_bytes());
    UserId(id.simple().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[tokio::test]
    async fn same_email_same_identity() {
        let gate = FakeAuthGate::new();
        let a = gate.authenticate(&credentials("bob@dylan.com", "toto1234!")).await.unwrap();
        let b = gate.authenticate(&credentials("bob@dylan.com", "other")).await.unwrap();
        let c = gate.authenticate(&credentials("ann@dylan.com", "toto1234!")).await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn default_gate_accepts_credentials() {
        let gate = FakeAuthGate::default();
        assert!(gate.authenticate(&credentials("a@b.c", "pw")).await.is_ok());
    }

    #[tokio::test]
    async fn empty_fields_are_rejected() {
        let gate = FakeAuthGate::new();
        assert!(matches!(
            gate.authenticate(&credentials("", "pw")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            gate.authenticate(&credentials("a@b.c", "")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
