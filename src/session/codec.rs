use std::collections::HashMap;
use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum SessionCodecError {
    #[error("session secret is too short (min {MIN_SECRET_LEN} bytes)")]
    SecretTooShort,

    #[error("invalid session cookie format")]
    InvalidFormat,

    #[error("session cookie signature is invalid")]
    InvalidSignature,

    #[error("failed to decode session payload")]
    PayloadDecode,

    #[error("failed to parse session payload")]
    PayloadParse,
}

/// Signs and verifies the session cookie. The cookie value is
/// `base64url(json map) "." base64url(hmac-sha256)`, so the browser holds
/// the whole session while the server only keeps the secret.
#[derive(Clone)]
pub struct SessionCodec {
    secret: Arc<[u8]>,
}

impl SessionCodec {
    pub fn new(secret: Vec<u8>) -> Result<Self, SessionCodecError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(SessionCodecError::SecretTooShort);
        }

        Ok(Self {
            secret: Arc::<[u8]>::from(secret),
        })
    }

    pub fn encode(&self, values: &HashMap<String, String>) -> Result<String, SessionCodecError> {
        let payload = serde_json::to_vec(values).map_err(|_| SessionCodecError::PayloadParse)?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
        let signature = self.sign(payload_b64.as_bytes())?;
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature);
        Ok(format!("{payload_b64}.{signature_b64}"))
    }

    pub fn decode(&self, raw: &str) -> Result<HashMap<String, String>, SessionCodecError> {
        let (payload_b64, signature_b64) = raw
            .split_once('.')
            .ok_or(SessionCodecError::InvalidFormat)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| SessionCodecError::InvalidFormat)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| SessionCodecError::InvalidSignature)?;
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionCodecError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| SessionCodecError::PayloadDecode)?;

        serde_json::from_slice(&payload).map_err(|_| SessionCodecError::PayloadParse)
    }

    fn sign(&self, bytes: &[u8]) -> Result<Vec<u8>, SessionCodecError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| SessionCodecError::InvalidSignature)?;
        mac.update(bytes);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}
