//! System clipboard publishing
//!
//! The clipboard is an external collaborator behind a narrow trait so the
//! connect flow can be exercised without a display server.
//!
//! On Linux the clipboard selection is owned by the process that set it
//! and is lost when that process exits. Implementations are therefore
//! responsible for making the contents outlive the CLI; [`serve`] is the
//! blocking half of that hand-off.

use crate::error::{ClipboardError, Ec2RdpError};

/// Destination for the decrypted password
///
/// A successful `set` means the text stays available for pasting after
/// the calling process exits.
pub trait ClipboardSink {
    /// Place a string on the clipboard
    fn set(&mut self, text: &str) -> Result<(), Ec2RdpError>;
}

/// Clipboard sink that sets the text directly
///
/// Sufficient on platforms where the clipboard outlives the setting
/// process (Windows, macOS). On Linux the selection would die with the
/// process, so the binary hands off to a detached child running
/// [`serve`] instead of using this sink.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn set(&mut self, text: &str) -> Result<(), Ec2RdpError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable {
            message: e.to_string(),
        })?;

        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::SetFailed {
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Claim the clipboard and keep serving the selection
///
/// Writes a single ack byte to stdout once the clipboard connection is
/// up, so a spawning process can report success before this call blocks.
/// On Linux the call then holds the selection until another program
/// replaces the clipboard contents; the caller is expected to run this
/// from a process that outlives the CLI.
pub fn serve(text: &str) -> Result<(), Ec2RdpError> {
    use std::io::Write;

    let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable {
        message: e.to_string(),
    })?;

    // Ack before blocking so the spawning process can report success
    let mut stdout = std::io::stdout();
    stdout.write_all(b"\n")?;
    stdout.flush()?;

    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;

        clipboard
            .set()
            .wait()
            .text(text.to_string())
            .map_err(|e| ClipboardError::SetFailed {
                message: e.to_string(),
            })?;
    }

    #[cfg(not(target_os = "linux"))]
    clipboard
        .set_text(text.to_string())
        .map_err(|e| ClipboardError::SetFailed {
            message: e.to_string(),
        })?;

    Ok(())
}
