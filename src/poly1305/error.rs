use core::fmt;

/// Errors returned by the fallible Poly1305 constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Poly1305Error {
    /// The one-time key was not exactly [`crate::poly1305::KEY_LEN`] bytes.
    InvalidKeyLength,
}

impl fmt::Display for Poly1305Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Poly1305Error::InvalidKeyLength => write!(f, "poly1305 key must be 32 bytes"),
        }
    }
}

impl std::error::Error for Poly1305Error {}
