//! Detached clipboard hand-off
//!
//! On Linux the clipboard selection is owned by the process that set it,
//! so a short-lived CLI cannot set the text and exit: the password would
//! vanish before the operator pastes it. The connect flow instead
//! re-invokes this binary with a hidden flag; the child reads the
//! password from stdin, claims the clipboard, acks one byte on stdout,
//! and keeps serving the selection until another program replaces it.

use ec2rdp_core::clipboard;
use ec2rdp_core::error::Ec2RdpError;
use std::io::Read;

#[cfg(target_os = "linux")]
use ec2rdp_core::clipboard::ClipboardSink;
#[cfg(target_os = "linux")]
use ec2rdp_core::error::ClipboardError;
#[cfg(target_os = "linux")]
use std::ffi::OsString;
#[cfg(target_os = "linux")]
use std::io::Write;
#[cfg(target_os = "linux")]
use std::path::PathBuf;
#[cfg(target_os = "linux")]
use std::process::{Command, Stdio};

/// Flag the spawned child runs under
#[cfg(target_os = "linux")]
pub const DAEMON_FLAG: &str = "--clipboard-daemon";

/// Entry point for the hidden daemon mode: read the password from stdin
/// and hold the clipboard selection until the contents are replaced
pub fn run_clipboard_daemon() -> Result<(), Ec2RdpError> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    clipboard::serve(&text)
}

/// Clipboard sink that hands the text to a detached child process
///
/// The child outlives this process and owns the selection, which is what
/// keeps the password pasteable after the CLI exits.
#[cfg(target_os = "linux")]
pub struct DetachedClipboard {
    program: PathBuf,
    args: Vec<OsString>,
}

#[cfg(target_os = "linux")]
impl DetachedClipboard {
    pub fn new() -> Result<Self, Ec2RdpError> {
        Ok(Self {
            program: std::env::current_exe()?,
            args: vec![OsString::from(DAEMON_FLAG)],
        })
    }

    #[cfg(test)]
    fn with_command(program: PathBuf, args: Vec<OsString>) -> Self {
        Self { program, args }
    }

    fn hand_off(&self, text: &str) -> Result<(), Ec2RdpError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::Unavailable {
                message: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ClipboardError::SetFailed {
                    message: e.to_string(),
                })?;
        }

        // The child acks once it owns the clipboard connection; EOF means
        // it died before claiming it, e.g. with no display server
        let mut stdout = child.stdout.take().ok_or_else(|| ClipboardError::SetFailed {
            message: "clipboard process has no stdout".to_string(),
        })?;
        let mut ack = [0u8; 1];
        if stdout.read_exact(&mut ack).is_err() {
            let _ = child.wait();
            return Err(ClipboardError::Unavailable {
                message: "clipboard process exited before claiming the clipboard".to_string(),
            }
            .into());
        }

        // The child is left running; it holds the selection until another
        // program replaces the clipboard contents
        Ok(())
    }
}

#[cfg(target_os = "linux")]
impl ClipboardSink for DetachedClipboard {
    fn set(&mut self, text: &str) -> Result<(), Ec2RdpError> {
        self.hand_off(text)
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn test_hand_off_succeeds_once_child_acks() {
        // `cat` echoes stdin back, so its first output byte doubles as
        // the ack a real child sends after claiming the clipboard
        let mut sink = DetachedClipboard::with_command(PathBuf::from("cat"), vec![]);
        assert!(sink.set("Adm1nPassw0rd!").is_ok());
    }

    #[test]
    fn test_hand_off_fails_when_child_exits_without_ack() {
        let mut sink = DetachedClipboard::with_command(PathBuf::from("true"), vec![]);
        let err = sink.set("Adm1nPassw0rd!").unwrap_err();
        assert!(matches!(err, Ec2RdpError::Clipboard(_)));
    }
}
