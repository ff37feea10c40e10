//! JWT Token handling

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Identifiable, User};
use crate::shared::AppResult;

/// Minimum HMAC-SHA-256 key length in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Symmetric key for HS256 signing
    pub secret: String,
    /// `iss` claim
    pub issuer: String,
    /// `aud` claim
    pub audience: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
}

impl JwtConfig {
    /// Reject configurations that must not be allowed to sign tokens.
    pub fn validate(&self) -> DomainResult<()> {
        if self.secret.is_empty() {
            return Err(DomainError::Configuration("JWT signing secret is not set".into()));
        }
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::Configuration(format!(
                "JWT signing secret is {} bytes, HS256 requires at least {}",
                self.secret.len(),
                MIN_SECRET_BYTES
            )));
        }
        if self.issuer.trim().is_empty() {
            return Err(DomainError::Configuration("JWT issuer is not set".into()));
        }
        if self.audience.trim().is_empty() {
            return Err(DomainError::Configuration("JWT audience is not set".into()));
        }
        if self.expiration_minutes <= 0 {
            return Err(DomainError::Configuration(format!(
                "JWT expiration must be positive, got {} minutes",
                self.expiration_minutes
            )));
        }
        self.expiry_from(Utc::now())?;
        Ok(())
    }

    /// Expiry instant for a token issued at `issued_at`.
    fn expiry_from(&self, issued_at: DateTime<Utc>) -> DomainResult<DateTime<Utc>> {
        self.expiration_minutes
            .checked_mul(60)
            .and_then(|_| Duration::try_minutes(self.expiration_minutes))
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                DomainError::Configuration(format!(
                    "JWT expiration of {} minutes is out of range",
                    self.expiration_minutes
                ))
            })
    }

    pub fn expires_in_seconds(&self) -> i64 {
        self.expiration_minutes.saturating_mul(60)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: String,
    pub email: String,
    /// Username
    pub nickname: String,
    /// "Name LastName"
    pub name: String,
    pub iss: String,
    pub aud: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Not before (Unix timestamp)
    pub nbf: i64,
    /// Unique token id
    pub jti: String,
}

impl TokenClaims {
    /// Build claims for a stored user.
    pub fn for_user(user: &User, config: &JwtConfig) -> DomainResult<Self> {
        if !user.has_identity() {
            return Err(DomainError::InvalidInput(format!(
                "user '{}' has no store-assigned identity",
                user.username
            )));
        }

        let now = Utc::now();
        let exp = config.expiry_from(now)?;

        Ok(Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            nickname: user.username.clone(),
            name: user.full_name(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signs and verifies HS256 tokens with a validated configuration.
#[derive(Clone)]
pub struct TokenIssuer {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(config: JwtConfig) -> DomainResult<Self> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.validate_nbf = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            config,
        })
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Mint a signed token attesting to `user`'s identity.
    pub fn issue(&self, user: &User) -> AppResult<String> {
        let claims = TokenClaims::for_user(user, &self.config)?;
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Check signature, expiry, issuer and audience, returning the claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Create a JWT token for a user
pub fn create_token(user: &User, config: &JwtConfig) -> AppResult<String> {
    TokenIssuer::new(config.clone())?.issue(user)
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> AppResult<TokenClaims> {
    Ok(TokenIssuer::new(config.clone())?.verify(token)?)
}
