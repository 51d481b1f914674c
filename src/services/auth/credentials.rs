/*
 * Responsibility
 * - Pick where the Firebase service account comes from (env JSON / env base64 / file)
 * - Load and validate it once at startup (fail fast; never per request)
 */
use std::fmt;
use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use thiserror::Error;

pub const SERVICE_ACCOUNT_KEY_ENV: &str = "FIREBASE_SERVICE_ACCOUNT_KEY";
pub const SERVICE_ACCOUNT_BASE64_ENV: &str = "FIREBASE_SERVICE_ACCOUNT_BASE64";
pub const SERVICE_ACCOUNT_FILE_ENV: &str = "FIREBASE_SERVICE_ACCOUNT_FILE";
pub const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "serviceAccountKey.json";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("service account is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("service account is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("decoded service account is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("failed to read service account file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("service account field '{0}' is missing or empty")]
    MissingField(&'static str),
    #[error("service account has type '{0}', expected 'service_account'")]
    WrongType(String),
}

/// Where the service account JSON is read from. First present source wins.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Inline(String),
    Base64(String),
    File(PathBuf),
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Inline material is a private key; never print it.
        match self {
            Self::Inline(_) => f.write_str("Inline(<redacted>)"),
            Self::Base64(_) => f.write_str("Base64(<redacted>)"),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

impl CredentialSource {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(json) = present(SERVICE_ACCOUNT_KEY_ENV) {
            Self::Inline(json)
        } else if let Some(encoded) = present(SERVICE_ACCOUNT_BASE64_ENV) {
            Self::Base64(encoded)
        } else {
            let path = present(SERVICE_ACCOUNT_FILE_ENV)
                .unwrap_or_else(|| DEFAULT_SERVICE_ACCOUNT_FILE.to_string());
            Self::File(PathBuf::from(path))
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Inline(_) => "environment variable",
            Self::Base64(_) => "base64 environment variable",
            Self::File(_) => "file",
        }
    }

    pub fn load(&self) -> Result<ServiceAccount, CredentialError> {
        let raw = match self {
            Self::Inline(json) => json.clone(),
            Self::Base64(encoded) => {
                let bytes = STANDARD.decode(encoded.trim())?;
                String::from_utf8(bytes)?
            }
            Self::File(path) => read_file(path)?,
        };

        ServiceAccount::from_json(&raw)
    }
}

fn read_file(path: &Path) -> Result<String, CredentialError> {
    std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// The subset of a Google service account key file this service relies on.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    private_key: String,
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .finish_non_exhaustive()
    }
}

impl ServiceAccount {
    pub fn from_json(raw: &str) -> Result<Self, CredentialError> {
        let account: ServiceAccount = serde_json::from_str(raw)?;

        if let Some(kind) = account.account_type.as_deref()
            && kind != "service_account"
        {
            return Err(CredentialError::WrongType(kind.to_string()));
        }
        if account.project_id.trim().is_empty() {
            return Err(CredentialError::MissingField("project_id"));
        }
        if account.client_email.trim().is_empty() {
            return Err(CredentialError::MissingField("client_email"));
        }
        if account.private_key.trim().is_empty() {
            return Err(CredentialError::MissingField("private_key"));
        }

        Ok(account)
    }
}
