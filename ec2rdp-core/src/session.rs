//! One-shot connect flow
//!
//! Strictly linear: resolve the output path, fetch instance data, optionally
//! decrypt the password and publish it to the clipboard, then write the
//! connection file. No step is retried; the first failure propagates.

use crate::clipboard::ClipboardSink;
use crate::config::KeyLocator;
use crate::crypto;
use crate::error::{Ec2RdpError, ProviderError};
use crate::prompt::PassphraseSource;
use crate::provider::InstanceInventory;
use crate::rdp::{self, ConnectionProfile};
use crate::types::Passphrase;
use std::path::PathBuf;
use tracing::{info, warn};

/// Inputs for one connect run
#[derive(Debug, Clone)]
pub struct ConnectRequest {
    /// EC2 instance identifier
    pub instance_id: String,
    /// Explicit output path; defaults to `<cwd>/<instance_id>.rdp`
    pub output: Option<PathBuf>,
    /// Explicit private key path; falls back to the profile config entry
    pub key: Option<PathBuf>,
    /// Skip the passphrase prompt and use an empty passphrase
    pub quick: bool,
}

/// What a successful run produced
#[derive(Debug)]
pub struct ConnectOutcome {
    /// Where the connection file was written
    pub output_path: PathBuf,
    /// Address the connection file points at
    pub address: String,
    /// Whether the decrypted password landed on the clipboard
    pub password_copied: bool,
    /// Clipboard failure, when decryption succeeded but publishing did not
    pub clipboard_warning: Option<String>,
}

/// Run the connect flow end to end
///
/// A clipboard failure after successful decryption is deliberately not
/// fatal: the warning is recorded on the outcome and the connection file
/// is still written.
pub async fn connect(
    request: &ConnectRequest,
    inventory: &dyn InstanceInventory,
    locator: &KeyLocator,
    passphrases: &dyn PassphraseSource,
    clipboard: &mut dyn ClipboardSink,
) -> Result<ConnectOutcome, Ec2RdpError> {
    let output_path = rdp::resolve_output_path(request.output.as_deref(), &request.instance_id)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let data = inventory.describe(&request.instance_id).await?;
    info!("Instance {} resolved to {}", request.instance_id, data.address);

    let mut password_copied = false;
    let mut clipboard_warning = None;

    if let Some(key_path) = locator.resolve(request.key.clone())? {
        if data.encrypted_password.is_empty() {
            return Err(ProviderError::PasswordDataUnavailable {
                instance_id: request.instance_id.clone(),
            }
            .into());
        }

        let passphrase = if request.quick {
            Passphrase::empty()
        } else {
            passphrases.read_passphrase(&key_path)?
        };

        let password =
            crypto::decrypt_password_data(&key_path, &passphrase, &data.encrypted_password)?;

        match clipboard.set(password.expose()) {
            Ok(()) => password_copied = true,
            Err(e) => {
                warn!("Could not publish password to clipboard: {}", e);
                clipboard_warning = Some(e.to_string());
            }
        }
    }

    let profile = ConnectionProfile::new(data.address.clone());
    profile.write_to(&output_path)?;

    Ok(ConnectOutcome {
        output_path,
        address: data.address,
        password_copied,
        clipboard_warning,
    })
}
