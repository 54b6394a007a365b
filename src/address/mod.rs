//! Onion address derivation for the two supported key formats
//!
//! - `legacy`: RSA-1024, 16-character addresses (SHA-1 of the PKCS#1 public key)
//! - `v3`: Ed25519, 56-character addresses (pubkey + SHA3 checksum + version)
//!
//! Identifiers are produced uppercase, which is what the matcher compares
//! against. Callers lowercase them for display and file names.

pub mod legacy;
pub mod v3;

use clap::ValueEnum;

use crate::error::{Result, VanityError};

pub use legacy::RsaOnionKey;
pub use v3::Ed25519OnionKey;

/// Address format to search for. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum KeyFormat {
    /// Legacy 16-character address backed by a 1024-bit RSA key
    Rsa,
    /// Version 3 56-character address backed by an Ed25519 key
    Ed25519,
}

impl KeyFormat {
    /// Generate a fresh key and derive its address
    #[inline(always)]
    pub fn generate(self) -> Result<OnionKey> {
        match self {
            KeyFormat::Rsa => RsaOnionKey::generate().map(OnionKey::Rsa1024),
            KeyFormat::Ed25519 => Ed25519OnionKey::generate().map(OnionKey::Ed25519V3),
        }
    }

    /// Minimum dictionary word length used when `--min` is not given
    pub fn default_min_length(self) -> usize {
        match self {
            KeyFormat::Rsa => 3,
            KeyFormat::Ed25519 => 4,
        }
    }

    /// Length of the base-32 identifier, without the `.onion` suffix
    pub fn identifier_len(self) -> usize {
        match self {
            KeyFormat::Rsa => legacy::IDENTIFIER_LEN,
            KeyFormat::Ed25519 => v3::IDENTIFIER_LEN,
        }
    }

    /// Tag that prefixes the exported private key
    pub fn private_key_tag(self) -> &'static str {
        match self {
            KeyFormat::Rsa => legacy::PRIVATE_KEY_TAG,
            KeyFormat::Ed25519 => v3::PRIVATE_KEY_TAG,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            KeyFormat::Rsa => "RSA-1024 (legacy, 16 chars)",
            KeyFormat::Ed25519 => "Ed25519 (v3, 56 chars)",
        }
    }
}

/// A generated key together with the address derived from its public half
pub enum OnionKey {
    Rsa1024(RsaOnionKey),
    Ed25519V3(Ed25519OnionKey),
}

impl OnionKey {
    pub fn format(&self) -> KeyFormat {
        match self {
            OnionKey::Rsa1024(_) => KeyFormat::Rsa,
            OnionKey::Ed25519V3(_) => KeyFormat::Ed25519,
        }
    }

    /// Uppercase base-32 address
    #[inline(always)]
    pub fn onion(&self) -> &str {
        match self {
            OnionKey::Rsa1024(key) => key.onion(),
            OnionKey::Ed25519V3(key) => key.onion(),
        }
    }

    /// Tagged private key string, exactly as written to the key file
    pub fn export_private_key(&self) -> Result<String> {
        match self {
            OnionKey::Rsa1024(key) => key.export_private_key(),
            OnionKey::Ed25519V3(key) => Ok(key.export_private_key()),
        }
    }
}

/// Re-derive the uppercase address from a stored, tagged private key.
///
/// RSA keys are rebuilt from their PKCS#1 encoding. Ed25519 keys only carry
/// the expanded form (`a || RH`), so the public key is recomputed as `a * B`.
pub fn onion_from_private_key(encoded: &str) -> Result<String> {
    let encoded = encoded.trim();
    if encoded.starts_with(legacy::PRIVATE_KEY_TAG) {
        let secret = legacy::decode_private_key(encoded)?;
        legacy::public_key_to_onion(&secret.to_public_key())
    } else if encoded.starts_with(v3::PRIVATE_KEY_TAG) {
        let expanded = v3::decode_private_key(encoded)?;
        let public = v3::public_key_from_expanded(&expanded);
        Ok(v3::public_key_to_onion(public.as_bytes()))
    } else {
        Err(VanityError::InvalidKey("unknown private key tag".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_properties() {
        assert_eq!(KeyFormat::Rsa.identifier_len(), 16);
        assert_eq!(KeyFormat::Ed25519.identifier_len(), 56);
        assert_eq!(KeyFormat::Rsa.private_key_tag(), "RSA1024:");
        assert_eq!(KeyFormat::Ed25519.private_key_tag(), "ED25519-V3:");
        assert_eq!(KeyFormat::Rsa.default_min_length(), 3);
        assert_eq!(KeyFormat::Ed25519.default_min_length(), 4);
    }

    #[test]
    fn test_format_from_cli_value() {
        assert_eq!(KeyFormat::from_str("rsa", false).unwrap(), KeyFormat::Rsa);
        assert_eq!(KeyFormat::from_str("ed25519", false).unwrap(), KeyFormat::Ed25519);
        assert!(KeyFormat::from_str("dsa", false).is_err());
    }

    #[test]
    fn test_generate_dispatches_on_format() {
        let key = KeyFormat::Ed25519.generate().unwrap();
        assert_eq!(key.format(), KeyFormat::Ed25519);
        assert_eq!(key.onion().len(), 56);

        let exported = key.export_private_key().unwrap();
        assert_eq!(onion_from_private_key(&exported).unwrap(), key.onion());
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = onion_from_private_key("DSA:AAAA").unwrap_err();
        assert!(matches!(err, VanityError::InvalidKey(_)));
    }
}
