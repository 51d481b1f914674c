//! Fixture RSA key shared by the verifier tests.
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use super::jwks::KeyStore;

pub const TEST_KID: &str = "test-key";

const TEST_KEY_PEM: &[u8] = include_bytes!("../../../tests/fixtures/firebase_test_key.pem");

const TEST_KEY_N: &str = "x8QJ0NP2cRM-i98w2D1YraC-NqcoygESRZRwVZgsFHeqNMozbJOh3GF2HTrItTXRZsX_nV4A1IxqvZzr_UPWie46mV1yEelDj4P8mJCLZs1mYKS8U3ZhG8bUACU_rW6pYKwYG5aIy2tQL79tk6tPwcu-ZQi2rn833IFpRMgqav0B2lX_vay8ttJ3k9Z8Ne3mwB4OWx4G2e_yz8AFlZAeLVCYQ5p5k-MwnbWfWQ-2w8o7tnd0z0KTRvPVJImIPU9peaITT0EJ82LLutIvx_10x6AVj6Pv4wXD3qCWiAj6A5lLgHNl1yzAu8x2r5vRhXN4PI87KH4STsV5DML1F3-HYw";

pub fn static_keys() -> KeyStore {
    let keys: JwkSet = serde_json::from_value(json!({
        "keys": [
            {
                "kty": "RSA",
                "kid": TEST_KID,
                "alg": "RS256",
                "use": "sig",
                "n": TEST_KEY_N,
                "e": "AQAB"
            },
            {
                "kty": "oct",
                "kid": "hmac-key",
                "k": "c2VjcmV0"
            }
        ]
    }))
    .unwrap();
    KeyStore::from_static(keys)
}

pub fn sign(claims: &Value, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_owned);
    let key = EncodingKey::from_rsa_pem(TEST_KEY_PEM).unwrap();
    jsonwebtoken::encode(&header, claims, &key).unwrap()
}
