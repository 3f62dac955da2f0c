//! Opaque session token.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of characters of a token that may appear in logs.
const FINGERPRINT_LEN: usize = 8;

/// An opaque, unguessable session token.
///
/// The token carries no structure callers may rely on; two tokens are the
/// same session only if they are byte-for-byte equal.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an already-generated token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The token as sent over the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning the raw string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// A short prefix safe to write to logs.
    pub fn fingerprint(&self) -> &str {
        fingerprint(&self.0)
    }
}

/// A short prefix of a raw token string, safe to write to logs.
pub fn fingerprint(token: &str) -> &str {
    match token.char_indices().nth(FINGERPRINT_LEN) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({}…)", self.fingerprint())
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// `Hash` is derived from the single `String` field, so it agrees with `str`.
impl Borrow<str> for SessionToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}
