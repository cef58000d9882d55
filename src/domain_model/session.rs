use serde::Serialize;
use std::fmt;

/// Opaque session credential handed to a client after login.
///
/// Freshly issued tokens are random v4 UUIDs in hyphenated form. Tokens read
/// back from a request are taken verbatim, so nothing here assumes the UUID
/// shape beyond [`SessionToken::generate`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn generate() -> Self {
        SessionToken(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        SessionToken(s.to_owned())
    }
}
