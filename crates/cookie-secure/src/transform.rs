//! [`CookieSecure`]: encode and decode cookie payloads through a keyed-cryptography service.

use anyhow::{Context, Result};
use common::{CookieTransformError, CookieValue, ProtectionLevel};

use crate::config::CookieSecureConfig;
use crate::machine_key::{KeyedCryptography, MachineKey};
use crate::protection;

/// Cookie transformer over an injected [`KeyedCryptography`] service.
///
/// Every call works on a clone of the input cookie; only the payload of the
/// returned cookie differs. The transformer holds no mutable state and is safe
/// to share between threads whenever the service is.
#[derive(Clone, Debug)]
pub struct CookieSecure<C = MachineKey> {
    crypto: C,
    default_level: ProtectionLevel,
}

impl CookieSecure<MachineKey> {
    /// Build a transformer over a [`MachineKey`] keyed from `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error if either configured key is invalid.
    pub fn from_config(cfg: &CookieSecureConfig) -> Result<Self> {
        let machine_key = MachineKey::from_config(cfg).context("invalid machine key configuration")?;
        Ok(Self::new(machine_key).with_default_level(cfg.default_protection))
    }
}

impl<C: KeyedCryptography> CookieSecure<C> {
    /// Create a transformer whose default level is [`ProtectionLevel::All`].
    pub fn new(crypto: C) -> Self {
        Self {
            crypto,
            default_level: ProtectionLevel::default(),
        }
    }

    /// Change the level used by [`encode`](Self::encode) and [`decode`](Self::decode).
    pub fn with_default_level(mut self, level: ProtectionLevel) -> Self {
        self.default_level = level;
        self
    }

    pub fn default_level(&self) -> ProtectionLevel {
        self.default_level
    }

    pub fn crypto(&self) -> &C {
        &self.crypto
    }

    /// Encode `cookie` at the default protection level.
    pub fn encode(&self, cookie: Option<&CookieValue>) -> Result<Option<CookieValue>, CookieTransformError> {
        self.encode_with(cookie, self.default_level)
    }

    /// Encode `cookie` at `level`.
    ///
    /// An absent cookie yields `Ok(None)`. An empty payload, or
    /// [`ProtectionLevel::None`], returns an unchanged clone without calling
    /// the service.
    ///
    /// # Errors
    ///
    /// Returns [`CookieTransformError`] if the service fails to encode.
    pub fn encode_with(
        &self,
        cookie: Option<&CookieValue>,
        level: ProtectionLevel,
    ) -> Result<Option<CookieValue>, CookieTransformError> {
        cookie
            .map(|c| {
                let value = self.encode_value(c.value(), level)?;
                Ok(c.clone().with_value(value))
            })
            .transpose()
    }

    /// Decode `cookie` at the default protection level.
    pub fn decode(&self, cookie: Option<&CookieValue>) -> Result<Option<CookieValue>, CookieTransformError> {
        self.decode_with(cookie, self.default_level)
    }

    /// Decode `cookie` at `level`.
    ///
    /// An absent cookie yields `Ok(None)` and an empty payload is returned
    /// unchanged, whatever the level. [`ProtectionLevel::None`] is not
    /// short-circuited here: it is decoded as [`ProtectionLevel::All`].
    ///
    /// # Errors
    ///
    /// Returns [`CookieTransformError`] if the payload is malformed, has been
    /// tampered with, was issued under other keys or another level, or does
    /// not decode to UTF-8.
    pub fn decode_with(
        &self,
        cookie: Option<&CookieValue>,
        level: ProtectionLevel,
    ) -> Result<Option<CookieValue>, CookieTransformError> {
        cookie
            .map(|c| {
                let value = self.decode_value(c.value(), level)?;
                Ok(c.clone().with_value(value))
            })
            .transpose()
    }

    /// Encode a bare payload string at `level`.
    pub fn encode_value(&self, text: &str, level: ProtectionLevel) -> Result<String, CookieTransformError> {
        // The service rejects empty input.
        if text.is_empty() || level == ProtectionLevel::None {
            return Ok(text.to_owned());
        }
        self.crypto
            .encode(text.as_bytes(), protection::map(level))
            .map_err(CookieTransformError::encode)
    }

    /// Decode a bare payload string at `level`.
    pub fn decode_value(&self, text: &str, level: ProtectionLevel) -> Result<String, CookieTransformError> {
        if text.is_empty() {
            return Ok(String::new());
        }
        let bytes = self
            .crypto
            .decode(text, protection::map(level))
            .map_err(CookieTransformError::decode)?;
        if bytes.is_empty() {
            return Err(CookieTransformError::tampered());
        }
        String::from_utf8(bytes).map_err(CookieTransformError::decode)
    }
}
