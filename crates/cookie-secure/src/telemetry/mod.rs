//! Structured logging setup for hosts embedding cookie protection.
//!
//! # Telemetry invariants
//!
//! - **No cookie payloads or key material** may appear in any log field.
//! - Log level is configurable via `COOKIE_SECURE_LOG_LEVEL` (default: `info`),
//!   overridden by `RUST_LOG` when set.

pub mod init;

pub use init::init_tracing;
