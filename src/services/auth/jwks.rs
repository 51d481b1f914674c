//! Google signing keys (JWKS) for Firebase ID tokens.
//!
//! - Keys are fetched over HTTPS and cached for the `max-age` Google sends
//!   in `Cache-Control` (falling back to one hour).
//! - Only RSA keys are accepted; Firebase signs ID tokens with RS256.
//! - A static key set (no fetching, never expires) can be supplied instead,
//!   which is how tests and emulators plug in their own keys.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use reqwest::header::CACHE_CONTROL;
use thiserror::Error;
use tokio::sync::RwLock;

pub const GOOGLE_SECURETOKEN_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("failed to build JWKS http client: {0}")]
    Client(String),
    #[error("failed to fetch signing keys: {0}")]
    Fetch(String),
    #[error("no signing key matches kid '{0}'")]
    NoMatchingKey(String),
    #[error("signing key '{0}' is not a usable RSA key")]
    UnsupportedKey(String),
}

struct CacheEntry {
    keys: JwkSet,
    fetched_at: Instant,
    ttl: Duration,
}

enum Source {
    Remote {
        url: String,
        client: reqwest::Client,
        cache: RwLock<Option<CacheEntry>>,
    },
    Static(JwkSet),
}

/// Cheap to clone; clones share the same cache.
#[derive(Clone)]
pub struct KeyStore {
    source: Arc<Source>,
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.source.as_ref() {
            Source::Remote { url, .. } => f.debug_struct("KeyStore").field("url", url).finish(),
            Source::Static(set) => f
                .debug_struct("KeyStore")
                .field("static_keys", &set.keys.len())
                .finish(),
        }
    }
}

impl KeyStore {
    pub fn remote(url: impl Into<String>) -> Result<Self, KeySetError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| KeySetError::Client(e.to_string()))?;

        Ok(Self {
            source: Arc::new(Source::Remote {
                url: url.into(),
                client,
                cache: RwLock::new(None),
            }),
        })
    }

    pub fn from_static(keys: JwkSet) -> Self {
        Self {
            source: Arc::new(Source::Static(keys)),
        }
    }

    /// Decoding key for the given `kid`.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, KeySetError> {
        let keys = self.key_set().await?;

        let jwk = keys
            .keys
            .iter()
            .find(|k| k.common.key_id.as_deref() == Some(kid))
            .ok_or_else(|| KeySetError::NoMatchingKey(kid.to_string()))?;

        match &jwk.algorithm {
            AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
                .map_err(|_| KeySetError::UnsupportedKey(kid.to_string())),
            _ => Err(KeySetError::UnsupportedKey(kid.to_string())),
        }
    }

    async fn key_set(&self) -> Result<JwkSet, KeySetError> {
        let (url, client, cache) = match self.source.as_ref() {
            Source::Static(keys) => return Ok(keys.clone()),
            Source::Remote { url, client, cache } => (url, client, cache),
        };

        {
            let cache = cache.read().await;
            if let Some(entry) = &*cache
                && entry.fetched_at.elapsed() < entry.ttl
            {
                return Ok(entry.keys.clone());
            }
        }

        let (keys, ttl) = fetch(client, url).await?;
        tracing::debug!(keys = keys.keys.len(), ttl_secs = ttl.as_secs(), "refreshed signing keys");

        let mut cache = cache.write().await;
        *cache = Some(CacheEntry {
            keys: keys.clone(),
            fetched_at: Instant::now(),
            ttl,
        });

        Ok(keys)
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<(JwkSet, Duration), KeySetError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| KeySetError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(KeySetError::Fetch(format!(
            "HTTP {} from JWKS endpoint",
            response.status()
        )));
    }

    let ttl = response
        .headers()
        .get(CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_max_age)
        .unwrap_or(DEFAULT_CACHE_TTL);

    let keys: JwkSet = response
        .json()
        .await
        .map_err(|e| KeySetError::Fetch(e.to_string()))?;

    Ok((keys, ttl))
}

fn parse_max_age(cache_control: &str) -> Option<Duration> {
    cache_control
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|secs| secs.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
