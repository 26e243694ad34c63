//! HMAC-SHA-256 signing of envelope contents.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::keys::KeyBytes;
use super::MachineKeyError;

type HmacSha256 = Hmac<Sha256>;

/// Byte length of an HMAC-SHA-256 tag.
pub const MAC_LEN: usize = 32;

fn keyed(key: &KeyBytes, parts: &[&[u8]]) -> HmacSha256 {
    // HMAC accepts keys of any length.
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key.as_bytes())
        .unwrap_or_else(|_| unreachable!("hmac accepts any key length"));
    for part in parts {
        mac.update(part);
    }
    mac
}

/// Compute the tag over the concatenation of `parts`.
pub fn sign(parts: &[&[u8]], key: &KeyBytes) -> [u8; MAC_LEN] {
    let mut tag = [0u8; MAC_LEN];
    tag.copy_from_slice(&keyed(key, parts).finalize().into_bytes());
    tag
}

/// Verify `tag` over the concatenation of `parts` in constant time.
///
/// # Errors
///
/// Returns [`MachineKeyError::SignatureMismatch`] if the tag does not match.
pub fn verify(parts: &[&[u8]], tag: &[u8], key: &KeyBytes) -> Result<(), MachineKeyError> {
    keyed(key, parts)
        .verify_slice(tag)
        .map_err(|_| MachineKeyError::SignatureMismatch)
}
