//! Credential verification boundary.
//!
//! The real-time channel admits a connection only after the bearer token
//! from the handshake query string passes verification. Verification is
//! behind a trait so the transport can be wired to the shared REST account
//! service in production and run against a local verifier in development
//! and tests.

use std::fmt;

use super::matchmaking::types::{PlayerInfo, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidToken => "INVALID_TOKEN",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Missing bearer token"),
            AuthError::InvalidToken => write!(f, "Invalid or expired token"),
        }
    }
}

/// Same verification the REST API applies to its bearer tokens. An
/// unreachable or failing verifier refuses the handshake; the client
/// retries the whole connection.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<PlayerInfo, AuthError>;
}

/// Development verifier: accepts `"<user-uuid>:<display-name>"` tokens so
/// the server runs without the external account service.
pub struct LocalVerifier;

impl CredentialVerifier for LocalVerifier {
    fn verify(&self, token: &str) -> Result<PlayerInfo, AuthError> {
        let (id, name) = token.split_once(':').ok_or(AuthError::InvalidToken)?;
        let id: UserId = id.parse().map_err(|_| AuthError::InvalidToken)?;
        if name.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(PlayerInfo {
            id,
            username: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn local_verifier_accepts_well_formed_tokens() {
        let id = Uuid::new_v4();
        let user = LocalVerifier.verify(&format!("{}:alice", id)).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn local_verifier_rejects_malformed_tokens() {
        assert_eq!(
            LocalVerifier.verify("garbage").unwrap_err(),
            AuthError::InvalidToken
        );
        assert_eq!(
            LocalVerifier.verify("not-a-uuid:alice").unwrap_err(),
            AuthError::InvalidToken
        );
        let id = Uuid::new_v4();
        assert_eq!(
            LocalVerifier.verify(&format!("{}:", id)).unwrap_err(),
            AuthError::InvalidToken
        );
    }
}
