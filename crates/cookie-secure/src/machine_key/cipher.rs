//! AES-256-GCM-SIV sealing of envelope bodies.
//!
//! AES-256-GCM-SIV (RFC 8452) is nonce-misuse-resistant: an accidental nonce
//! repeat only reveals whether two plaintexts are equal. A fresh random nonce
//! is still drawn for every seal.

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng, Payload},
    Aes256GcmSiv, Nonce,
};

use super::keys::KeyBytes;
use super::MachineKeyError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the AES-GCM-SIV authentication tag.
pub const AEAD_TAG_LEN: usize = 16;

/// Encrypt `plaintext` bound to `aad`, returning `nonce || ciphertext+tag`.
///
/// # Errors
///
/// Returns [`MachineKeyError::AeadFailure`] on an internal AEAD error (should be
/// unreachable with a validated key).
pub fn seal(plaintext: &[u8], aad: &[u8], key: &KeyBytes) -> Result<Vec<u8>, MachineKeyError> {
    let cipher = build_cipher(key)?;

    use aes_gcm_siv::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, Payload { msg: plaintext, aad })
        .map_err(|_| MachineKeyError::AeadFailure)?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt a `nonce || ciphertext+tag` body produced by [`seal`].
///
/// # Errors
///
/// Returns [`MachineKeyError::InvalidFormat`] if the body is too short, and
/// [`MachineKeyError::AeadFailure`] if authentication fails (wrong key, wrong
/// `aad`, or tampered data).
pub fn open(sealed: &[u8], aad: &[u8], key: &KeyBytes) -> Result<Vec<u8>, MachineKeyError> {
    if sealed.len() < NONCE_LEN + AEAD_TAG_LEN {
        return Err(MachineKeyError::InvalidFormat);
    }
    let cipher = build_cipher(key)?;
    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), Payload { msg: ciphertext, aad })
        .map_err(|_| MachineKeyError::AeadFailure)
}

fn build_cipher(key: &KeyBytes) -> Result<Aes256GcmSiv, MachineKeyError> {
    Aes256GcmSiv::new_from_slice(key.as_bytes()).map_err(|_| MachineKeyError::AeadFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine_key::MachineKeys;

    fn keys(byte: u8) -> MachineKeys {
        MachineKeys::new(&[0x55; 32], &[byte; KEY_LEN]).unwrap()
    }

    #[test]
    fn seal_open_round_trip() {
        let k = keys(0x42);
        let sealed = seal(b"123-45-6789", b"hdr", k.decryption()).unwrap();
        assert_eq!(sealed.len(), NONCE_LEN + 11 + AEAD_TAG_LEN);
        assert_eq!(open(&sealed, b"hdr", k.decryption()).unwrap(), b"123-45-6789");
    }

    #[test]
    fn fresh_nonce_per_seal() {
        let k = keys(0x42);
        let a = seal(b"same", b"", k.decryption()).unwrap();
        let b = seal(b"same", b"", k.decryption()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails() {
        let sealed = seal(b"secret", b"", keys(0x01).decryption()).unwrap();
        assert!(matches!(
            open(&sealed, b"", keys(0x02).decryption()),
            Err(MachineKeyError::AeadFailure)
        ));
    }

    #[test]
    fn wrong_aad_fails() {
        let k = keys(0x42);
        let sealed = seal(b"secret", b"a", k.decryption()).unwrap();
        assert!(open(&sealed, b"b", k.decryption()).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let k = keys(0x42);
        let mut sealed = seal(b"tamper me", b"", k.decryption()).unwrap();
        // Flip a byte in the ciphertext to simulate tampering.
        sealed[NONCE_LEN] ^= 0xFF;
        assert!(open(&sealed, b"", k.decryption()).is_err());
    }

    #[test]
    fn truncated_body_is_invalid_format() {
        let k = keys(0x42);
        assert!(matches!(
            open(&[0u8; NONCE_LEN], b"", k.decryption()),
            Err(MachineKeyError::InvalidFormat)
        ));
    }
}
