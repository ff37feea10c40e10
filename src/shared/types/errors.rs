use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Credential mismatch. Carries no detail about which field was wrong.
    #[error("Invalid credentials")]
    AuthenticationFailed,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Seeding failed: {0}")]
    SeedingFailed(String),
}

impl DomainError {
    /// Whether this error must stop the process before it accepts traffic.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::SeedingFailed(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Crypto error: {0}")]
    Crypto(#[from] jsonwebtoken::errors::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Infra(InfraError::Crypto(e))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_errors_are_fatal() {
        assert!(DomainError::Configuration("weak secret".into()).is_fatal());
        assert!(DomainError::SeedingFailed("empty".into()).is_fatal());
        assert!(!DomainError::AuthenticationFailed.is_fatal());
        assert!(!DomainError::InvalidInput("id".into()).is_fatal());
    }

    #[test]
    fn authentication_failure_message_is_generic() {
        assert_eq!(DomainError::AuthenticationFailed.to_string(), "Invalid credentials");
    }
}
