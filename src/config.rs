/*
 * Responsibility
 * - Read settings from the environment (.env via dotenvy): PORT, APP_ENV,
 *   SECRET_KEY, CORS_ORIGINS, Firebase credential source
 * - Validate them (invalid values stop the process at startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

use crate::services::auth::credentials::CredentialSource;
use crate::services::auth::jwks::GOOGLE_SECURETOKEN_JWKS_URL;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-in-production";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    Testing,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub secret_key: String,

    // "*" anywhere in the list allows any origin
    pub cors_origins: Vec<String>,

    pub credential_source: CredentialSource,
    pub firebase_project_id: Option<String>,
    pub jwks_url: Url,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print secret_key
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_origins", &self.cors_origins)
            .field("credential_source", &self.credential_source)
            .field("firebase_project_id", &self.firebase_project_id)
            .field("jwks_url", &self.jwks_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let secret_key = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let credential_source = CredentialSource::from_lookup(&lookup);

        let firebase_project_id = lookup("FIREBASE_PROJECT_ID")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let jwks_url = lookup("FIREBASE_JWKS_URL")
            .unwrap_or_else(|| GOOGLE_SECURETOKEN_JWKS_URL.to_string());
        let jwks_url = Url::parse(&jwks_url).map_err(|_| ConfigError::Invalid("FIREBASE_JWKS_URL"))?;

        Ok(Self {
            addr,
            app_env,
            secret_key,
            cors_origins,
            credential_source,
            firebase_project_id,
            jwks_url,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        Config::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config(&[]).unwrap();

        assert_eq!(config.addr.port(), DEFAULT_PORT);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.uses_default_secret());
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(
            config.credential_source,
            CredentialSource::File(PathBuf::from("serviceAccountKey.json"))
        );
        assert_eq!(config.jwks_url.as_str(), GOOGLE_SECURETOKEN_JWKS_URL);
    }

    #[test]
    fn reads_explicit_values() {
        let config = config(&[
            ("PORT", "8080"),
            ("APP_ENV", "Production"),
            ("SECRET_KEY", "s3cret"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("FIREBASE_PROJECT_ID", "demo"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert!(!config.uses_default_secret());
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.firebase_project_id.as_deref(), Some("demo"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("PORT")));
    }

    #[test]
    fn invalid_jwks_url_is_rejected() {
        let err = config(&[("FIREBASE_JWKS_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("FIREBASE_JWKS_URL")));
    }

    #[test]
    fn app_env_aliases() {
        assert_eq!(AppEnv::parse(Some("prod")), AppEnv::Production);
        assert_eq!(AppEnv::parse(Some("test")), AppEnv::Testing);
        assert_eq!(AppEnv::parse(Some("staging")), AppEnv::Development);
        assert_eq!(AppEnv::parse(None), AppEnv::Development);
    }

    #[test]
    fn debug_hides_secret_key() {
        let config = config(&[("SECRET_KEY", "super-secret-value")]).unwrap();
        assert!(!format!("{config:?}").contains("super-secret-value"));
    }
}
