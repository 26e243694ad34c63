//! Public protection levels a caller can request for a cookie payload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a cookie payload is protected.
///
/// - [`ProtectionLevel::None`] leaves the payload as plain text.
/// - [`ProtectionLevel::Validation`] adds tamper detection only.
/// - [`ProtectionLevel::Encryption`] adds confidentiality. Whether integrity is
///   also implied is up to the keyed-cryptography service.
/// - [`ProtectionLevel::All`] adds both and is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionLevel {
    None,
    Validation,
    Encryption,
    #[default]
    All,
}

impl ProtectionLevel {
    /// Every level, in declaration order.
    pub const ALL_LEVELS: [ProtectionLevel; 4] = [
        ProtectionLevel::None,
        ProtectionLevel::Validation,
        ProtectionLevel::Encryption,
        ProtectionLevel::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionLevel::None => "none",
            ProtectionLevel::Validation => "validation",
            ProtectionLevel::Encryption => "encryption",
            ProtectionLevel::All => "all",
        }
    }
}

impl fmt::Display for ProtectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`ProtectionLevel`].
#[derive(Debug, Error)]
#[error("unknown protection level: {0:?}")]
pub struct ParseProtectionLevelError(String);

impl FromStr for ProtectionLevel {
    type Err = ParseProtectionLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ProtectionLevel::None),
            "validation" => Ok(ProtectionLevel::Validation),
            "encryption" => Ok(ProtectionLevel::Encryption),
            "all" => Ok(ProtectionLevel::All),
            _ => Err(ParseProtectionLevelError(s.to_owned())),
        }
    }
}
