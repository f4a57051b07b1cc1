//! Secret key handling using the secrecy crate
//!
//! The MyTracker secret key signs every request. It is held in a
//! [`SecretString`] so it is zeroed on drop, redacted from `Debug` output and
//! only readable through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use mytracker::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("secret-key".to_string());
//! assert_eq!(key.expose_secret().as_bytes(), b"secret-key");
//! assert!(!format!("{key:?}").contains("secret-key"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype that satisfies the `Secret` trait bounds
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    /// Raw bytes, used as the HMAC key
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns true if the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A zeroize-on-drop, debug-redacted string
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string into a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
