use base64::{engine::general_purpose::STANDARD, Engine as _};
use data_encoding::BASE32;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::{Digest, Sha1};

use crate::error::{Result, VanityError};

pub const RSA_KEY_BITS: usize = 1024;
pub const PRIVATE_KEY_TAG: &str = "RSA1024:";
pub const IDENTIFIER_LEN: usize = 16;

/// Number of SHA-1 bytes that make up the address (first half of the digest)
const ADDRESS_BYTES: usize = 10;

/// 1024-bit RSA key with its legacy onion address
pub struct RsaOnionKey {
    secret: RsaPrivateKey,
    onion: String,
}

impl RsaOnionKey {
    /// Generate a new key from the thread-local CSPRNG.
    ///
    /// Any failure inside the RSA primitive is returned so the caller can drop
    /// the candidate and try again.
    pub fn generate() -> Result<Self> {
        let secret = RsaPrivateKey::new(&mut rand::thread_rng(), RSA_KEY_BITS)?;
        Self::from_private_key(secret)
    }

    pub fn from_private_key(secret: RsaPrivateKey) -> Result<Self> {
        let onion = public_key_to_onion(&secret.to_public_key())?;
        Ok(Self { secret, onion })
    }

    pub fn secret_key(&self) -> &RsaPrivateKey {
        &self.secret
    }

    pub fn onion(&self) -> &str {
        &self.onion
    }

    /// `RSA1024:` followed by the base-64 PKCS#1 DER private key
    pub fn export_private_key(&self) -> Result<String> {
        let der = EncodeRsaPrivateKey::to_pkcs1_der(&self.secret)?;
        Ok(format!("{}{}", PRIVATE_KEY_TAG, STANDARD.encode(der.as_bytes())))
    }
}

/// First 10 bytes of SHA-1 over the PKCS#1 `RSAPublicKey` DER encoding
pub fn public_key_to_raw_onion(public_key: &RsaPublicKey) -> Result<[u8; ADDRESS_BYTES]> {
    let der = EncodeRsaPublicKey::to_pkcs1_der(public_key)?;
    let hash = Sha1::digest(der.as_bytes());

    let mut raw = [0u8; ADDRESS_BYTES];
    raw.copy_from_slice(&hash[..ADDRESS_BYTES]);
    Ok(raw)
}

/// Convert an RSA public key to its 16-character uppercase onion address
pub fn public_key_to_onion(public_key: &RsaPublicKey) -> Result<String> {
    Ok(BASE32.encode(&public_key_to_raw_onion(public_key)?))
}

/// Parse an `RSA1024:` tagged key string back into the private key
pub fn decode_private_key(encoded: &str) -> Result<RsaPrivateKey> {
    let body = encoded
        .trim()
        .strip_prefix(PRIVATE_KEY_TAG)
        .ok_or_else(|| VanityError::InvalidKey(format!("missing {} tag", PRIVATE_KEY_TAG)))?;
    let der = STANDARD
        .decode(body)
        .map_err(|e| VanityError::InvalidKey(e.to_string()))?;
    Ok(RsaPrivateKey::from_pkcs1_der(&der)?)
}
