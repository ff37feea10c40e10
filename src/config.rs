//! Configuration module
//!
//! Settings are read from a TOML file (default:
//! `~/.config/userdir/config.toml`), then environment overrides are applied.
//! Every section and field is optional; missing values fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::shared::{AppResult, DomainError, DomainResult, InfraError};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub jwt: JwtSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtSettings {
    /// HS256 signing secret. No default: startup fails until one is provided.
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_minutes: i64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "userdir".to_string(),
            audience: "userdir-clients".to_string(),
            expiration_minutes: 60,
        }
    }
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// EnvFilter directive, e.g. `info` or `userdir=debug,tower_http=info`
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("userdir")
        .join("config.toml")
}

impl AppConfig {
    /// Load from `path`, falling back to defaults if the file does not exist,
    /// then apply environment overrides.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(InfraError::from)?;
            Self::from_toml(&raw)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `JWT_*` overrides from a lookup function (the process env in
    /// production, a map in tests). A set but malformed value is an error.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> DomainResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Some(issuer) = lookup("JWT_ISSUER") {
            self.jwt.issuer = issuer;
        }
        if let Some(audience) = lookup("JWT_AUDIENCE") {
            self.jwt.audience = audience;
        }
        if let Some(raw) = lookup("JWT_EXPIRATION_MINUTES") {
            self.jwt.expiration_minutes = raw.trim().parse().map_err(|e| {
                DomainError::Configuration(format!(
                    "JWT_EXPIRATION_MINUTES is not an integer: '{}' ({})",
                    raw, e
                ))
            })?;
        }
        Ok(())
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt.secret.clone(),
            issuer: self.jwt.issuer.clone(),
            audience: self.jwt.audience.clone(),
            expiration_minutes: self.jwt.expiration_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.jwt.expiration_minutes, 60);
        assert!(cfg.jwt.secret.is_empty());
        assert_eq!(cfg.logging.format, "pretty");
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [jwt]
            secret = "file-secret-file-secret-file-secret"
            audience = "Designli"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.jwt.audience, "Designli");
        assert_eq!(cfg.jwt.issuer, "userdir");
        assert!(cfg.jwt_config().validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            AppConfig::from_toml("[server\nport = 1"),
            Err(InfraError::Config(_))
        ));
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("JWT_SECRET", "env-secret-env-secret-env-secret-env"),
            ("JWT_EXPIRATION_MINUTES", "5"),
            ("JWT_ISSUER", "EnvIssuer"),
        ]);
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(cfg.jwt.secret, "env-secret-env-secret-env-secret-env");
        assert_eq!(cfg.jwt.expiration_minutes, 5);
        assert_eq!(cfg.jwt.issuer, "EnvIssuer");
        assert_eq!(cfg.jwt.audience, "userdir-clients");
    }

    #[test]
    fn unparsable_ttl_override_is_configuration_error() {
        let mut cfg = AppConfig::default();
        let err = cfg
            .apply_env_overrides(|k| (k == "JWT_EXPIRATION_MINUTES").then(|| "5m".to_string()))
            .unwrap_err();

        assert!(matches!(err, DomainError::Configuration(_)));
        assert!(err.to_string().contains("JWT_EXPIRATION_MINUTES"));
    }

    #[test]
    fn default_config_has_no_usable_secret() {
        assert!(AppConfig::default().jwt_config().validate().is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("userdir-no-such-dir").join("config.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.server.port, 8080);
    }
}
