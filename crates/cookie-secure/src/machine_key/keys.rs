//! [`MachineKeys`]: the validation and decryption keys a [`MachineKey`](super::MachineKey) is built from.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::cipher::KEY_LEN;

/// Minimum validation key length, matching the HMAC-SHA-256 output size.
pub const MIN_VALIDATION_KEY_LEN: usize = 32;

/// Errors produced while loading key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The validation key is too short to be a safe HMAC key.
    #[error("validation key too short: expected at least {MIN_VALIDATION_KEY_LEN} bytes, got {0}")]
    ValidationKeyTooShort(usize),

    /// The decryption key is not an AES-256 key.
    #[error("decryption key has invalid length: expected {KEY_LEN} bytes, got {0}")]
    InvalidDecryptionKeyLength(usize),

    /// The named key is not valid standard base64.
    #[error("{0} is not valid base64")]
    InvalidBase64(&'static str),
}

/// Owned key buffer.
///
/// When this type is dropped the memory is overwritten with zeroes, and its
/// `Debug` output never shows the bytes.
#[derive(Clone)]
pub struct KeyBytes(Box<[u8]>);

impl KeyBytes {
    fn new(bytes: &[u8]) -> Self {
        Self(bytes.to_vec().into_boxed_slice())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for KeyBytes {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("KeyBytes([REDACTED])")
    }
}

/// Validated pair of keys shared by every node that must read the same cookies.
#[derive(Clone, Debug)]
pub struct MachineKeys {
    validation: KeyBytes,
    decryption: KeyBytes,
}

impl MachineKeys {
    /// Build a key pair from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::ValidationKeyTooShort`] if the validation key is
    /// shorter than [`MIN_VALIDATION_KEY_LEN`], or
    /// [`KeyError::InvalidDecryptionKeyLength`] if the decryption key is not
    /// exactly [`KEY_LEN`] bytes.
    pub fn new(validation: &[u8], decryption: &[u8]) -> Result<Self, KeyError> {
        if validation.len() < MIN_VALIDATION_KEY_LEN {
            return Err(KeyError::ValidationKeyTooShort(validation.len()));
        }
        if decryption.len() != KEY_LEN {
            return Err(KeyError::InvalidDecryptionKeyLength(decryption.len()));
        }
        Ok(Self {
            validation: KeyBytes::new(validation),
            decryption: KeyBytes::new(decryption),
        })
    }

    /// Build a key pair from standard-base64 strings, as found in configuration.
    pub fn from_base64(validation: &str, decryption: &str) -> Result<Self, KeyError> {
        let mut validation = STANDARD
            .decode(validation.trim())
            .map_err(|_| KeyError::InvalidBase64("validation key"))?;
        let mut decryption = STANDARD
            .decode(decryption.trim())
            .map_err(|_| KeyError::InvalidBase64("decryption key"))?;
        let keys = Self::new(&validation, &decryption);
        validation.iter_mut().for_each(|b| *b = 0);
        decryption.iter_mut().for_each(|b| *b = 0);
        keys
    }

    pub fn validation(&self) -> &KeyBytes {
        &self.validation
    }

    pub fn decryption(&self) -> &KeyBytes {
        &self.decryption
    }
}
