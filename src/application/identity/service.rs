//! Identity service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::{info, warn};

use super::queries::UserSummary;
use super::verifier::CredentialVerifier;
use crate::domain::{DomainError, Store, User};
use crate::infrastructure::crypto::jwt::{TokenClaims, TokenIssuer};
use crate::shared::{AppError, AppResult};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub username: String,
    pub expires_in: i64,
}

pub struct IdentityService {
    store: Arc<dyn Store<User>>,
    verifier: Arc<dyn CredentialVerifier>,
    issuer: TokenIssuer,
}

impl IdentityService {
    pub fn new(
        store: Arc<dyn Store<User>>,
        verifier: Arc<dyn CredentialVerifier>,
        issuer: TokenIssuer,
    ) -> Self {
        Self {
            store,
            verifier,
            issuer,
        }
    }

    /// Check credentials and mint a token for the matched user.
    pub fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let user = match self.verifier.verify(username, password) {
            Ok(user) => user,
            Err(e) => {
                warn!(username, "Login rejected");
                return Err(e.into());
            }
        };

        let token = self.issuer.issue(&user)?;
        info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(LoginResult {
            token,
            username: user.username,
            expires_in: self.issuer.config().expires_in_seconds(),
        })
    }

    /// Validate a bearer token presented by a client.
    pub fn authenticate(&self, token: &str) -> AppResult<TokenClaims> {
        self.issuer.verify(token).map_err(|e| {
            warn!("Token rejected: {}", e);
            AppError::Domain(DomainError::AuthenticationFailed)
        })
    }

    /// All registered users, in identity order, without credentials.
    pub fn list_users(&self) -> Vec<UserSummary> {
        self.store
            .get_all()
            .into_iter()
            .map(UserSummary::from)
            .collect()
    }

    pub fn user_count(&self) -> usize {
        self.store.count()
    }
}
