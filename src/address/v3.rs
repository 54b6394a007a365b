use base64::{engine::general_purpose::STANDARD, Engine as _};
use data_encoding::BASE32;
use ed25519_dalek::hazmat::ExpandedSecretKey;
use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::RngCore;
use sha2::{Digest, Sha512};
use tiny_keccak::{Hasher, Sha3};

use crate::error::{Result, VanityError};

pub const PRIVATE_KEY_TAG: &str = "ED25519-V3:";
pub const IDENTIFIER_LEN: usize = 56;
pub const VERSION: u8 = 0x03;

/// Domain separator hashed in front of the public key
pub const CHECKSUM_TAG: &[u8; 15] = b".onion checksum";

/// pubkey (32) + checksum (2) + version (1)
pub const RAW_ADDRESS_LEN: usize = 35;

/// Ed25519 key with its v3 onion address
pub struct Ed25519OnionKey {
    seed: [u8; 32],
    public: VerifyingKey,
    onion: String,
}

impl Ed25519OnionKey {
    /// Generate a new key from a 32-byte seed drawn from the thread-local CSPRNG
    #[inline(always)]
    pub fn generate() -> Result<Self> {
        let mut seed = [0u8; 32];
        rand::thread_rng().try_fill_bytes(&mut seed)?;
        Ok(Self::from_seed(seed))
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        let public = SigningKey::from_bytes(&seed).verifying_key();
        let onion = public_key_to_onion(public.as_bytes());
        Self { seed, public, onion }
    }

    pub fn public_key(&self) -> &VerifyingKey {
        &self.public
    }

    pub fn onion(&self) -> &str {
        &self.onion
    }

    /// `ED25519-V3:` followed by base-64 of the expanded secret `a || RH`
    pub fn export_private_key(&self) -> String {
        format!("{}{}", PRIVATE_KEY_TAG, STANDARD.encode(expand_seed(&self.seed)))
    }
}

/// First two bytes of SHA3-256(".onion checksum" || pubkey || version)
#[inline(always)]
pub fn onion_checksum(public_key: &[u8; 32]) -> [u8; 2] {
    let mut sha3 = Sha3::v256();
    sha3.update(CHECKSUM_TAG);
    sha3.update(public_key);
    sha3.update(&[VERSION]);
    let mut hash = [0u8; 32];
    sha3.finalize(&mut hash);

    [hash[0], hash[1]]
}

/// Raw 35-byte address before base-32 encoding
#[inline(always)]
pub fn public_key_to_raw_onion(public_key: &[u8; 32]) -> [u8; RAW_ADDRESS_LEN] {
    let mut raw = [0u8; RAW_ADDRESS_LEN];
    raw[..32].copy_from_slice(public_key);
    raw[32..34].copy_from_slice(&onion_checksum(public_key));
    raw[34] = VERSION;
    raw
}

/// Convert an Ed25519 public key to its 56-character uppercase onion address
pub fn public_key_to_onion(public_key: &[u8; 32]) -> String {
    BASE32.encode(&public_key_to_raw_onion(public_key))
}

/// Expand a seed into the 64-byte secret stored in key files.
///
/// The first half is the clamped scalar `a`, the second half is the unmodified
/// upper half of SHA-512(seed).
pub fn expand_seed(seed: &[u8; 32]) -> [u8; 64] {
    let hash = Sha512::digest(seed);

    let mut expanded = [0u8; 64];
    expanded.copy_from_slice(&hash);
    expanded[0] &= 248;
    expanded[31] &= 127;
    expanded[31] |= 64;
    expanded
}

/// Parse an `ED25519-V3:` tagged key string back into the expanded secret
pub fn decode_private_key(encoded: &str) -> Result<[u8; 64]> {
    let body = encoded
        .trim()
        .strip_prefix(PRIVATE_KEY_TAG)
        .ok_or_else(|| VanityError::InvalidKey(format!("missing {} tag", PRIVATE_KEY_TAG)))?;
    let bytes = STANDARD
        .decode(body)
        .map_err(|e| VanityError::InvalidKey(e.to_string()))?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        VanityError::InvalidKey(format!("expected 64 key bytes, got {}", bytes.len()))
    })
}

/// Public key `a * B` for an expanded secret
pub fn public_key_from_expanded(expanded: &[u8; 64]) -> VerifyingKey {
    VerifyingKey::from(&ExpandedSecretKey::from_bytes(expanded))
}
