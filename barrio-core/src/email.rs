//! Customer email address type.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+(?:\.[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+)*$")
        .expect("local part pattern is valid")
});

static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+(?:[A-Za-z]{2,63}|xn--[A-Za-z0-9]{1,59})$")
        .expect("domain pattern is valid")
});

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    #[error("email local part {0:?} is not valid")]
    InvalidLocalPart(String),
    #[error("email domain {0:?} is not valid")]
    InvalidDomain(String),
}

/// A syntactically valid email address.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed before validation
/// - At most 254 characters (RFC 5321)
/// - Dot-atom local part: no leading, trailing or doubled dots
/// - Dotted domain ending in an alphabetic (or punycode) top-level label, or
///   the bare `localhost`
///
/// ```
/// use barrio_core::Email;
///
/// assert!(Email::parse(" a@b.com ").is_ok());
/// assert!(Email::parse("user.name+tag@sub.domain.co").is_ok());
///
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse("user@localhost").is_ok());
/// assert!(Email::parse("user@intranet").is_err());
/// assert!(Email::parse("user..dots@b.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from raw customer input.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first rule the input breaks.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.rsplit_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if !LOCAL_PART.is_match(local) {
            return Err(EmailError::InvalidLocalPart(local.to_string()));
        }

        if !domain.eq_ignore_ascii_case("localhost") && !DOMAIN.is_match(domain) {
            return Err(EmailError::InvalidDomain(domain.to_string()));
        }

        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let email = Email::parse("  a@b.com\n").unwrap();
        assert_eq!(email.as_str(), "a@b.com");
        assert_eq!(email.domain(), "b.com");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
        assert_eq!(Email::parse("plainaddress"), Err(EmailError::MissingAtSymbol));
        assert!(matches!(Email::parse("@b.com"), Err(EmailError::InvalidLocalPart(_))));
        assert!(matches!(Email::parse(".a@b.com"), Err(EmailError::InvalidLocalPart(_))));
        assert!(matches!(Email::parse("a@"), Err(EmailError::InvalidDomain(_))));
        assert!(matches!(Email::parse("a@b"), Err(EmailError::InvalidDomain(_))));
        assert!(matches!(Email::parse("a@-b.com"), Err(EmailError::InvalidDomain(_))));
        assert!(matches!(Email::parse("a b@c.com"), Err(EmailError::InvalidLocalPart(_))));
    }

    #[test]
    fn test_localhost_domain() {
        assert_eq!(Email::parse("ops@localhost").unwrap().domain(), "localhost");
        assert!(Email::parse("ops@LocalHost").is_ok());
        assert!(matches!(Email::parse("ops@localhost."), Err(EmailError::InvalidDomain(_))));
        assert!(matches!(Email::parse("ops@mylocalhost"), Err(EmailError::InvalidDomain(_))));
    }

    #[test]
    fn test_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(Email::parse(&long), Err(EmailError::TooLong { max: 254 }));
    }

    #[test]
    fn test_serde_validates() {
        let ok: Email = serde_json::from_str("\"ana@example.org\"").unwrap();
        assert_eq!(ok.to_string(), "ana@example.org");
        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
    }
}
