//! `cookie-secure` — tamper-evident, optionally encrypted HTTP cookie values.
//!
//! [`CookieSecure`] clones a [`CookieValue`] and passes its payload through a
//! [`KeyedCryptography`] service at the requested [`ProtectionLevel`]. The
//! bundled [`MachineKey`] service uses operator-supplied keys, so every node
//! that shares the same keys can decode cookies issued by any other.
//!
//! ```no_run
//! use cookie_secure::{CookieSecure, CookieSecureConfig, CookieValue};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = CookieSecureConfig::from_env()?;
//! let secure = CookieSecure::from_config(&cfg)?;
//!
//! let cookie = CookieValue::new("MyCookieName", "My details");
//! let encoded = secure.encode(Some(&cookie))?;
//! let decoded = secure.decode(encoded.as_ref())?;
//! assert_eq!(decoded.unwrap().value(), "My details");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod machine_key;
pub mod protection;
pub mod telemetry;
pub mod transform;

pub use common::{CookieTransformError, CookieValue, ProtectionLevel};
pub use config::CookieSecureConfig;
pub use machine_key::{KeyedCryptography, MachineKey, MachineKeyError, MachineKeyProtection};
pub use transform::CookieSecure;
