//! Credential verification

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainError, DomainResult, Store, User};

/// Resolves a username/password pair to at most one stored user.
///
/// Implementations must not reveal which of the two fields failed to match.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> DomainResult<User>;
}

/// Exact, case-sensitive comparison against plaintext passwords in the store.
///
/// Scans the full snapshot on every call. Swap in a hashing verifier before
/// storing real credentials.
pub struct PlaintextCredentialVerifier {
    store: Arc<dyn Store<User>>,
}

impl PlaintextCredentialVerifier {
    pub fn new(store: Arc<dyn Store<User>>) -> Self {
        Self { store }
    }
}

impl CredentialVerifier for PlaintextCredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> DomainResult<User> {
        let matched = self
            .store
            .get_all()
            .into_iter()
            .find(|u| u.username == username && u.password == password);

        match matched {
            Some(user) => Ok(user),
            None => {
                debug!(username, "No stored user matches the supplied credentials");
                Err(DomainError::AuthenticationFailed)
            }
        }
    }
}
