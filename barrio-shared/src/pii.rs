use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps customer contact data so it never reaches log output in clear text.
///
/// `Display` and `Debug` keep the first character and, for email addresses,
/// the domain: `ana@example.com` renders as `a***@example.com`. Serialization
/// is transparent because persisted and outbound payloads need the real value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.0.as_ref();
        let first = raw.chars().next();
        match (first, raw.rfind('@')) {
            (Some(c), Some(at)) => write!(f, "{}***{}", c, &raw[at..]),
            (Some(c), None) => write!(f, "{}***", c),
            (None, _) => write!(f, "***"),
        }
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}
