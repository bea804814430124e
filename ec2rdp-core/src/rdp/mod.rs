//! Connection file rendering and writing
//!
//! The output format is the fixed five-line `.rdp` profile understood by
//! remote desktop clients. Field names and casing are load-bearing and
//! must not change.

use crate::error::Ec2RdpError;
use crate::paths::expand_tilde;
use crate::types::RDP_USERNAME;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The rendered connection profile for one instance
///
/// Every field except the address is fixed: auto-connect on, username
/// `Administrator`, clipboard redirection on, credential prompt on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    /// Public address of the instance
    pub address: String,
}

impl ConnectionProfile {
    /// Create a profile pointing at an address
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    /// Render the five-line profile, byte-for-byte
    pub fn render(&self) -> String {
        format!(
            "auto connect:i:1\n\
             full address:s:{}\n\
             username:s:{}\n\
             redirectclipboard:i:1\n\
             prompt for credentials on client:i:1\n",
            self.address, RDP_USERNAME
        )
    }

    /// Write the profile to a file, creating parent directories
    ///
    /// An existing file at the path is overwritten without confirmation.
    pub fn write_to(&self, path: &Path) -> Result<(), Ec2RdpError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Writing connection file to {:?}", path);
        std::fs::write(path, self.render())?;

        Ok(())
    }
}

/// Resolve the output path for a run
///
/// Defaults to `<cwd>/<instance_id>.rdp` when no explicit path is given;
/// explicit paths are tilde-expanded.
pub fn resolve_output_path(
    output: Option<&Path>,
    instance_id: &str,
) -> Result<PathBuf, Ec2RdpError> {
    let path = match output {
        Some(path) => expand_tilde(path),
        None => std::env::current_dir()?.join(format!("{}.rdp", instance_id)),
    };

    Ok(path)
}
