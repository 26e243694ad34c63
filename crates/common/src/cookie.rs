//! The cookie value record passed through encode and decode.
//!
//! A [`CookieValue`] is never mutated in place. Every transformation clones the
//! record and swaps in a new payload via [`CookieValue::with_value`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An HTTP cookie: a name, an opaque payload, and its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieValue {
    name: String,
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires: Option<DateTime<Utc>>,
    #[serde(default)]
    http_only: bool,
    #[serde(default)]
    secure: bool,
}

impl CookieValue {
    /// Construct a cookie with the given name and payload and no attributes set.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            expires: None,
            http_only: false,
            secure: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cookie payload. Empty when the cookie carries no value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    pub fn http_only(&self) -> bool {
        self.http_only
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Replace the payload, keeping every other attribute.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn full_cookie() -> CookieValue {
        CookieValue::new("MyCookie", "TestValue")
            .with_domain("example.com")
            .with_path("/app")
            .with_expires(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
            .with_http_only(true)
            .with_secure(true)
    }

    #[test]
    fn new_has_no_attributes() {
        let c = CookieValue::new("sid", "abc");
        assert_eq!(c.name(), "sid");
        assert_eq!(c.value(), "abc");
        assert!(c.domain().is_none());
        assert!(c.path().is_none());
        assert!(c.expires().is_none());
        assert!(!c.http_only());
        assert!(!c.secure());
    }

    #[test]
    fn with_value_keeps_attributes() {
        let original = full_cookie();
        let replaced = original.clone().with_value("other");
        assert_eq!(replaced.value(), "other");
        assert_eq!(replaced.name(), original.name());
        assert_eq!(replaced.domain(), Some("example.com"));
        assert_eq!(replaced.path(), Some("/app"));
        assert_eq!(replaced.expires(), original.expires());
        assert!(replaced.http_only());
        assert!(replaced.secure());
        // the source record is untouched
        assert_eq!(original.value(), "TestValue");
    }

    #[test]
    fn serde_omits_unset_attributes() {
        let json = serde_json::to_value(CookieValue::new("sid", "abc")).unwrap();
        assert!(json.get("domain").is_none());
        assert!(json.get("expires").is_none());
        assert_eq!(json["http_only"], false);
    }

    #[test]
    fn deserialize_defaults_flags() {
        let c: CookieValue = serde_json::from_str(r#"{"name":"sid","value":"abc"}"#).unwrap();
        assert_eq!(c, CookieValue::new("sid", "abc"));
    }

    #[test]
    fn serde_keeps_expiry() {
        let c = full_cookie();
        let json = serde_json::to_string(&c).unwrap();
        let decoded: CookieValue = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.expires(), c.expires());
    }
}
