//! Cookie types, protection levels, and errors shared across `cookie-secure` crates.

pub mod cookie;
pub mod error;
pub mod protection;

pub use cookie::CookieValue;
pub use error::{CookieTransformError, Operation};
pub use protection::ProtectionLevel;
