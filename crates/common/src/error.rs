//! The error raised when a cookie payload cannot be encoded or decoded.

use std::error::Error as StdError;

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The transformation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encode,
    Decode,
}

impl Operation {
    /// Fixed, caller-safe message for a failure of this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Encode => "unable to encode cookie value",
            Operation::Decode => "unable to decode cookie value: it is invalid or has been tampered with",
        }
    }
}

/// Failure to encode or decode a cookie payload.
///
/// The message is fixed per [`Operation`] so it can be surfaced to callers
/// without leaking detail. The low-level cause, when one exists, is kept as
/// the [`source`](StdError::source) together with its own cause chain.
#[derive(Debug, Error)]
#[error("{}", .operation.failure_message())]
pub struct CookieTransformError {
    operation: Operation,
    #[source]
    source: Option<BoxError>,
}

impl CookieTransformError {
    /// Encoding failed inside the keyed-cryptography service.
    pub fn encode(source: impl Into<BoxError>) -> Self {
        Self {
            operation: Operation::Encode,
            source: Some(source.into()),
        }
    }

    /// Decoding failed inside the keyed-cryptography service or produced
    /// unusable output.
    pub fn decode(source: impl Into<BoxError>) -> Self {
        Self {
            operation: Operation::Decode,
            source: Some(source.into()),
        }
    }

    /// Decoding produced no data, which means the payload was tampered with or
    /// corrupted. There is no underlying cause.
    pub fn tampered() -> Self {
        Self {
            operation: Operation::Decode,
            source: None,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("mac mismatch")
        }
    }

    impl StdError for Inner {}

    #[derive(Debug, Error)]
    #[error("primitive failed")]
    struct Outer(#[source] Inner);

    #[test]
    fn message_is_fixed_per_operation() {
        let e = CookieTransformError::encode(Outer(Inner));
        assert_eq!(e.to_string(), Operation::Encode.failure_message());
        let d = CookieTransformError::tampered();
        assert_eq!(d.to_string(), Operation::Decode.failure_message());
        assert_eq!(d.operation(), Operation::Decode);
    }

    #[test]
    fn tampered_has_no_source() {
        assert!(CookieTransformError::tampered().source().is_none());
    }

    #[test]
    fn full_cause_chain_is_kept() {
        let e = CookieTransformError::decode(Outer(Inner));
        let outer = e.source().expect("outer cause");
        assert_eq!(outer.to_string(), "primitive failed");
        let inner = outer.source().expect("inner cause");
        assert_eq!(inner.to_string(), "mac mismatch");
    }
}
