use base64::{URL_SAFE_NO_PAD, encode_config};
use jwt_simple::prelude::ES256KeyPair;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::config;
use crate::types::push::VapidConfig;

#[derive(Debug, Clone)]
pub struct VapidCredentials {
    pub private_key: String,
    pub public_key: String,
}

#[derive(Debug, Clone)]
pub(crate) enum VapidConfigStatus {
    Missing,
    Incomplete,
    /// All three values are set but the public key is not a valid
    /// base64url P-256 point.
    Invalid,
    Ready(VapidConfig),
}

pub(crate) fn load_vapid_config(config: &config::AppConfig) -> VapidConfigStatus {
    let private_key = config.vapid_private_key.as_ref();
    let public_key = config.vapid_public_key.as_ref();
    let subject = config.vapid_subject.as_ref();
    let has_any = private_key.is_some() || public_key.is_some() || subject.is_some();

    match (private_key, public_key, subject) {
        (Some(private_key), Some(public_key), Some(subject)) => {
            if decode_public_key(public_key).is_err() {
                return VapidConfigStatus::Invalid;
            }
            VapidConfigStatus::Ready(VapidConfig {
                private_key: private_key.clone(),
                public_key: public_key.clone(),
                subject: subject.clone(),
            })
        }
        _ if has_any => VapidConfigStatus::Incomplete,
        _ => VapidConfigStatus::Missing,
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PublicKeyError {
    Decode(base64::DecodeError),
    NotUncompressedPoint,
}

impl std::fmt::Display for PublicKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublicKeyError::Decode(err) => write!(f, "invalid base64url key: {err}"),
            PublicKeyError::NotUncompressedPoint => {
                f.write_str("key is not a 65-byte uncompressed P-256 point")
            }
        }
    }
}

/// Decodes a base64url key, tolerating both padded and unpadded forms.
/// Stripping trailing `=` before decoding with the no-pad alphabet is
/// equivalent to restoring the padding a standard-base64 decoder expects.
pub(crate) fn decode_key_bytes(key: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let trimmed = key.trim_end_matches('=');
    base64::decode_config(trimmed, URL_SAFE_NO_PAD)
}

/// An applicationServerKey must decode to an uncompressed P-256 point:
/// 65 bytes with a 0x04 prefix.
pub(crate) fn decode_public_key(key: &str) -> Result<Vec<u8>, PublicKeyError> {
    let bytes = decode_key_bytes(key).map_err(PublicKeyError::Decode)?;
    if bytes.len() != 65 || bytes[0] != 0x04 {
        return Err(PublicKeyError::NotUncompressedPoint);
    }
    Ok(bytes)
}

pub fn generate_vapid_credentials() -> Result<VapidCredentials, web_push::WebPushError> {
    let mut rng = OsRng;
    generate_vapid_credentials_with_rng(&mut rng)
}

pub(crate) fn generate_vapid_credentials_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<VapidCredentials, web_push::WebPushError> {
    let key_pair = generate_es256_keypair_with_rng(rng);
    let private_key = encode_config(key_pair.to_bytes(), URL_SAFE_NO_PAD);
    let public_key =
        web_push::VapidSignatureBuilder::from_base64_no_sub(&private_key, URL_SAFE_NO_PAD)?
            .get_public_key();
    let public_key = encode_config(public_key, URL_SAFE_NO_PAD);

    Ok(VapidCredentials {
        private_key,
        public_key,
    })
}

fn generate_es256_keypair_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> ES256KeyPair {
    let mut key_bytes = [0u8; 32];
    loop {
        rng.fill_bytes(&mut key_bytes);
        if let Ok(key_pair) = ES256KeyPair::from_bytes(&key_bytes) {
            return key_pair;
        }
    }
}
