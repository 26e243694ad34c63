//! The keyed-cryptography service that cookie payloads are passed through.
//!
//! [`KeyedCryptography`] is the capability the transformer depends on. It is
//! injected rather than reached through a global, so tests can swap in a fake
//! and hosts can plug in their own key management.
//!
//! [`MachineKey`] is the bundled implementation. It is keyed by a validation
//! key (HMAC-SHA-256) and a decryption key (AES-256-GCM-SIV) supplied by the
//! operator; nodes configured with the same keys interoperate.
//!
//! # Envelope format
//!
//! ```text
//! base64url-no-pad( version(1) || protection(1) || body )
//!
//! validation: data || hmac(header || data)
//! encryption: nonce(12) || aead(data, aad = header)
//! all:        nonce(12) || aead(data, aad = header) || hmac(header || nonce || ciphertext)
//! ```

pub mod cipher;
pub mod keys;
pub mod mac;
pub mod service;

use std::sync::Arc;

use thiserror::Error;

pub use keys::{KeyError, MachineKeys};
pub use service::MachineKey;

/// Protection vocabulary of the keyed-cryptography service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineKeyProtection {
    /// Encrypt and sign.
    All,
    /// Encrypt only. The AEAD still authenticates the ciphertext.
    Encryption,
    /// Sign only; the data travels in the clear.
    Validation,
}

impl MachineKeyProtection {
    /// Byte identifying this protection inside an envelope.
    pub(crate) fn tag(&self) -> u8 {
        match self {
            MachineKeyProtection::All => 0x01,
            MachineKeyProtection::Encryption => 0x02,
            MachineKeyProtection::Validation => 0x03,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(MachineKeyProtection::All),
            0x02 => Some(MachineKeyProtection::Encryption),
            0x03 => Some(MachineKeyProtection::Validation),
            _ => None,
        }
    }
}

impl std::fmt::Display for MachineKeyProtection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MachineKeyProtection::All => "all",
            MachineKeyProtection::Encryption => "encryption",
            MachineKeyProtection::Validation => "validation",
        };
        f.write_str(s)
    }
}

/// Errors produced by the keyed-cryptography layer.
#[derive(Debug, Error)]
pub enum MachineKeyError {
    /// There is nothing to protect.
    #[error("input data is empty")]
    EmptyInput,

    /// The text is not base64url, or is too short to hold an envelope.
    #[error("invalid envelope format")]
    InvalidFormat,

    /// The envelope was produced by an unknown format version.
    #[error("unsupported envelope version {0}")]
    UnsupportedVersion(u8),

    /// The envelope was produced under a different protection.
    #[error("envelope protection mismatch: expected {expected}, found {found}")]
    ProtectionMismatch {
        expected: MachineKeyProtection,
        found: MachineKeyProtection,
    },

    /// The HMAC tag does not match the data (tampered, or wrong validation key).
    #[error("signature verification failed")]
    SignatureMismatch,

    /// AES-GCM-SIV encryption or decryption failed.
    #[error("aead operation failed")]
    AeadFailure,
}

/// Keyed encode/decode primitive that cookie payloads are passed through.
///
/// Implementations must be reentrant: the transformer calls them from any
/// thread without coordination.
#[cfg_attr(test, mockall::automock)]
pub trait KeyedCryptography: Send + Sync {
    /// Produce a tamper-evident, text-safe encoding of `data`.
    fn encode(&self, data: &[u8], protection: MachineKeyProtection) -> Result<String, MachineKeyError>;

    /// Reverse [`encode`](KeyedCryptography::encode), failing on tampering,
    /// key mismatch, or malformed input.
    fn decode(&self, text: &str, protection: MachineKeyProtection) -> Result<Vec<u8>, MachineKeyError>;
}

impl<T: KeyedCryptography + ?Sized> KeyedCryptography for Arc<T> {
    fn encode(&self, data: &[u8], protection: MachineKeyProtection) -> Result<String, MachineKeyError> {
        (**self).encode(data, protection)
    }

    fn decode(&self, text: &str, protection: MachineKeyProtection) -> Result<Vec<u8>, MachineKeyError> {
        (**self).decode(text, protection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for p in [
            MachineKeyProtection::All,
            MachineKeyProtection::Encryption,
            MachineKeyProtection::Validation,
        ] {
            assert_eq!(MachineKeyProtection::from_tag(p.tag()), Some(p));
        }
        assert_eq!(MachineKeyProtection::from_tag(0x00), None);
    }

    #[test]
    fn arc_delegates_to_inner() {
        let mut mock = MockKeyedCryptography::new();
        mock.expect_encode()
            .returning(|_, _| Ok("encoded".to_owned()));
        let shared: Arc<dyn KeyedCryptography> = Arc::new(mock);
        assert_eq!(shared.encode(b"x", MachineKeyProtection::All).unwrap(), "encoded");
    }
}
