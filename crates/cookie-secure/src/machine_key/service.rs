//! [`MachineKey`]: the bundled [`KeyedCryptography`] implementation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use tracing::debug;

use super::keys::{KeyError, MachineKeys};
use super::mac::{self, MAC_LEN};
use super::{cipher, KeyedCryptography, MachineKeyError, MachineKeyProtection};
use crate::config::CookieSecureConfig;

/// Envelope format version written as the first byte of every envelope.
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = 2;

/// Keyed encode/decode service backed by a shared [`MachineKeys`] pair.
#[derive(Clone, Debug)]
pub struct MachineKey {
    keys: MachineKeys,
}

impl MachineKey {
    pub fn new(keys: MachineKeys) -> Self {
        Self { keys }
    }

    /// Build the service from the base64 keys in `cfg`.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if either key is not valid base64 or has the
    /// wrong length.
    pub fn from_config(cfg: &CookieSecureConfig) -> Result<Self, KeyError> {
        let keys = MachineKeys::from_base64(&cfg.validation_key, &cfg.decryption_key)?;
        Ok(Self::new(keys))
    }

    fn seal(&self, data: &[u8], protection: MachineKeyProtection) -> Result<Vec<u8>, MachineKeyError> {
        let header = [FORMAT_VERSION, protection.tag()];
        let mut envelope = header.to_vec();
        match protection {
            MachineKeyProtection::Validation => {
                let tag = mac::sign(&[&header[..], data], self.keys.validation());
                envelope.extend_from_slice(data);
                envelope.extend_from_slice(&tag);
            }
            MachineKeyProtection::Encryption => {
                let sealed = cipher::seal(data, &header, self.keys.decryption())?;
                envelope.extend_from_slice(&sealed);
            }
            MachineKeyProtection::All => {
                let sealed = cipher::seal(data, &header, self.keys.decryption())?;
                let tag = mac::sign(&[&header[..], sealed.as_slice()], self.keys.validation());
                envelope.extend_from_slice(&sealed);
                envelope.extend_from_slice(&tag);
            }
        }
        Ok(envelope)
    }

    fn open(&self, envelope: &[u8], protection: MachineKeyProtection) -> Result<Vec<u8>, MachineKeyError> {
        if envelope.len() < HEADER_LEN {
            return Err(MachineKeyError::InvalidFormat);
        }
        let (header, body) = envelope.split_at(HEADER_LEN);
        if header[0] != FORMAT_VERSION {
            return Err(MachineKeyError::UnsupportedVersion(header[0]));
        }
        let found = MachineKeyProtection::from_tag(header[1]).ok_or(MachineKeyError::InvalidFormat)?;
        if found != protection {
            return Err(MachineKeyError::ProtectionMismatch {
                expected: protection,
                found,
            });
        }

        match protection {
            MachineKeyProtection::Validation => {
                let (data, tag) = split_mac(body)?;
                mac::verify(&[header, data], tag, self.keys.validation())?;
                Ok(data.to_vec())
            }
            MachineKeyProtection::Encryption => cipher::open(body, header, self.keys.decryption()),
            MachineKeyProtection::All => {
                let (sealed, tag) = split_mac(body)?;
                mac::verify(&[header, sealed], tag, self.keys.validation())?;
                cipher::open(sealed, header, self.keys.decryption())
            }
        }
    }
}

fn split_mac(body: &[u8]) -> Result<(&[u8], &[u8]), MachineKeyError> {
    if body.len() < MAC_LEN {
        return Err(MachineKeyError::InvalidFormat);
    }
    Ok(body.split_at(body.len() - MAC_LEN))
}

impl KeyedCryptography for MachineKey {
    fn encode(&self, data: &[u8], protection: MachineKeyProtection) -> Result<String, MachineKeyError> {
        if data.is_empty() {
            return Err(MachineKeyError::EmptyInput);
        }
        let envelope = self.seal(data, protection)?;
        Ok(URL_SAFE_NO_PAD.encode(envelope))
    }

    fn decode(&self, text: &str, protection: MachineKeyProtection) -> Result<Vec<u8>, MachineKeyError> {
        let envelope = URL_SAFE_NO_PAD
            .decode(text)
            .map_err(|_| MachineKeyError::InvalidFormat)
            .inspect_err(|_| debug!(%protection, "envelope is not base64url"))?;
        // Only the error kind is logged: never the envelope or its contents.
        self.open(&envelope, protection)
            .inspect_err(|e| debug!(%protection, error = %e, "envelope rejected"))
    }
}
