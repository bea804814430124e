//! Type definitions and wrappers for secure data handling
//!
//! This module provides type-safe wrappers for sensitive data using the
//! secrecy crate to prevent accidental exposure in logs or debug output.

use secrecy::{ExposeSecret, Secret};

/// Wrapper for the decrypted Windows administrator password
///
/// The password exists only in process memory. Its only sinks are the
/// system clipboard and nothing else; it is never written to disk.
#[derive(Clone, Debug)]
pub struct AdminPassword(Secret<String>);

impl AdminPassword {
    /// Create a new AdminPassword from a decrypted plaintext string
    pub fn new(password: String) -> Self {
        Self(Secret::new(password))
    }

    /// Expose the password value (use with caution!)
    ///
    /// This should only be called when placing the password on the
    /// system clipboard.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for AdminPassword {
    fn from(password: String) -> Self {
        Self::new(password)
    }
}

/// Wrapper for the private key passphrase
///
/// An empty passphrase means the key file is assumed to be unencrypted,
/// which is what `--quick` mode produces without prompting.
#[derive(Clone, Debug)]
pub struct Passphrase(Secret<String>);

impl Passphrase {
    /// Create a new Passphrase from user input
    pub fn new(passphrase: String) -> Self {
        Self(Secret::new(passphrase))
    }

    /// The empty passphrase used by `--quick` mode
    pub fn empty() -> Self {
        Self(Secret::new(String::new()))
    }

    /// Expose the passphrase value (use with caution!)
    ///
    /// This should only be called when passing the passphrase to the
    /// key decoding routines.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for Passphrase {
    fn from(passphrase: String) -> Self {
        Self::new(passphrase)
    }
}

/// Username baked into every generated connection file
pub const RDP_USERNAME: &str = "Administrator";
