//! Passphrase prompting
//!
//! The blocking console read lives behind a trait so tests can supply a
//! canned passphrase instead of driving real terminal I/O.

use crate::error::Ec2RdpError;
use crate::types::Passphrase;
use std::path::Path;

/// Source of the private key passphrase
pub trait PassphraseSource {
    /// Obtain the passphrase for a key file; empty means "no passphrase"
    fn read_passphrase(&self, key_path: &Path) -> Result<Passphrase, Ec2RdpError>;
}

/// Interactive prompt with hidden input
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub fn new() -> Self {
        Self
    }
}

impl PassphraseSource for ConsolePrompt {
    fn read_passphrase(&self, key_path: &Path) -> Result<Passphrase, Ec2RdpError> {
        let prompt = format!(
            "Password for key file {} (leave blank if none): ",
            key_path.display()
        );
        let passphrase = rpassword::prompt_password(prompt)?;
        Ok(Passphrase::new(passphrase))
    }
}
