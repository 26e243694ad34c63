//! Configuration loading and validation for cookie protection.
//!
//! Values are read from `COOKIE_SECURE_*` environment variables. Every node that
//! must read the same cookies needs the same validation and decryption keys.

use anyhow::{Context, Result};
use common::ProtectionLevel;
use serde::Deserialize;
use tracing::info;

use crate::machine_key::MachineKeys;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "COOKIE_SECURE";

/// Validated cookie protection configuration.
#[derive(Clone, Deserialize)]
pub struct CookieSecureConfig {
    /// Base64 HMAC key, at least 32 bytes once decoded. **Required.**
    pub validation_key: String,

    /// Base64 AES-256 key, exactly 32 bytes once decoded. **Required.**
    pub decryption_key: String,

    /// Level used when a caller does not name one.
    #[serde(default)]
    pub default_protection: ProtectionLevel,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl std::fmt::Debug for CookieSecureConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSecureConfig")
            .field("validation_key", &"[REDACTED]")
            .field("decryption_key", &"[REDACTED]")
            .field("default_protection", &self.default_protection)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl CookieSecureConfig {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to build configuration from environment")?;

        let c: CookieSecureConfig = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        info!(default_protection = %c.default_protection, "cookie protection configured");
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.validation_key, "COOKIE_SECURE_VALIDATION_KEY")?;
        ensure_non_empty(&self.decryption_key, "COOKIE_SECURE_DECRYPTION_KEY")?;
        MachineKeys::from_base64(&self.validation_key, &self.decryption_key)
            .context("COOKIE_SECURE_VALIDATION_KEY / COOKIE_SECURE_DECRYPTION_KEY are invalid")?;
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    fn cfg(validation: &[u8], decryption: &[u8]) -> CookieSecureConfig {
        CookieSecureConfig {
            validation_key: STANDARD.encode(validation),
            decryption_key: STANDARD.encode(decryption),
            default_protection: ProtectionLevel::default(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(ProtectionLevel::default(), ProtectionLevel::All);
    }

    #[test]
    fn validate_accepts_good_keys() {
        assert!(cfg(&[1u8; 48], &[2u8; 32]).validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_validation_key() {
        let mut c = cfg(&[1u8; 32], &[2u8; 32]);
        c.validation_key = "  ".into();
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("COOKIE_SECURE_VALIDATION_KEY"));
    }

    #[test]
    fn validate_rejects_short_decryption_key() {
        assert!(cfg(&[1u8; 32], &[2u8; 24]).validate().is_err());
    }

    #[test]
    fn deserialises_from_source_map() {
        let v = STANDARD.encode([1u8; 32]);
        let d = STANDARD.encode([2u8; 32]);
        let c: CookieSecureConfig = config::Config::builder()
            .set_override("validation_key", v)
            .unwrap()
            .set_override("decryption_key", d)
            .unwrap()
            .set_override("default_protection", "validation")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(c.default_protection, ProtectionLevel::Validation);
        assert_eq!(c.log_level, "info");
        c.validate().unwrap();
    }

    #[test]
    fn debug_redacts_keys() {
        let c = cfg(&[1u8; 32], &[2u8; 32]);
        let dbg = format!("{c:?}");
        assert!(!dbg.contains(&c.validation_key));
        assert!(dbg.contains("REDACTED"));
    }
}
