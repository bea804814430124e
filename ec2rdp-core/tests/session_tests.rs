//! End-to-end tests for the connect flow
//!
//! Runs the full flow against fake collaborators: a canned inventory, a
//! recording clipboard, and a stubbed passphrase source.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use ec2rdp_core::clipboard::ClipboardSink;
use ec2rdp_core::config::KeyLocator;
use ec2rdp_core::error::{ClipboardError, Ec2RdpError, ProviderError};
use ec2rdp_core::prompt::PassphraseSource;
use ec2rdp_core::provider::{InstanceData, InstanceInventory};
use ec2rdp_core::session::{connect, ConnectRequest};
use ec2rdp_core::types::Passphrase;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::LineEnding;
use rsa::rand_core::OsRng;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Inventory returning one canned instance
struct FakeInventory {
    data: InstanceData,
}

#[async_trait]
impl InstanceInventory for FakeInventory {
    async fn describe(&self, _instance_id: &str) -> Result<InstanceData, Ec2RdpError> {
        Ok(self.data.clone())
    }
}

/// Inventory that knows no instances
struct EmptyInventory;

#[async_trait]
impl InstanceInventory for EmptyInventory {
    async fn describe(&self, instance_id: &str) -> Result<InstanceData, Ec2RdpError> {
        Err(ProviderError::NotFound {
            instance_id: instance_id.to_string(),
        }
        .into())
    }
}

/// Clipboard recording what was placed on it
#[derive(Default)]
struct RecordingClipboard {
    contents: Option<String>,
}

impl ClipboardSink for RecordingClipboard {
    fn set(&mut self, text: &str) -> Result<(), Ec2RdpError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard that always fails, like a headless environment
struct HeadlessClipboard;

impl ClipboardSink for HeadlessClipboard {
    fn set(&mut self, _text: &str) -> Result<(), Ec2RdpError> {
        Err(ClipboardError::Unavailable {
            message: "no display".to_string(),
        }
        .into())
    }
}

/// Passphrase source that must never be consulted
struct NoPrompt;

impl PassphraseSource for NoPrompt {
    fn read_passphrase(&self, key_path: &Path) -> Result<Passphrase, Ec2RdpError> {
        panic!("Passphrase prompt invoked for {:?}", key_path);
    }
}

/// Locator that never finds a config entry
fn no_config_locator() -> KeyLocator {
    KeyLocator::with_config_path(None, PathBuf::from("/nonexistent/aws/config"))
}

/// Generate a key pair, write the private half as PEM, and encrypt a
/// plaintext blob with the public half
fn key_and_blob(dir: &tempfile::TempDir, plaintext: &str) -> (PathBuf, String) {
    let key = RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
    let public = RsaPublicKey::from(&key);

    let pem = key.to_pkcs1_pem(LineEnding::LF).unwrap();
    let key_path = dir.path().join("key.pem");
    std::fs::write(&key_path, pem.as_bytes()).unwrap();

    let ciphertext = public
        .encrypt(&mut OsRng, Pkcs1v15Encrypt, plaintext.as_bytes())
        .unwrap();

    (key_path, BASE64.encode(ciphertext))
}

#[tokio::test]
async fn test_connect_without_key_skips_clipboard() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("i-0abc123.rdp");

    let inventory = FakeInventory {
        data: InstanceData {
            address: "ec2-52-1-2-3.compute-1.amazonaws.com".to_string(),
            encrypted_password: String::new(),
        },
    };
    let mut clipboard = RecordingClipboard::default();

    let request = ConnectRequest {
        instance_id: "i-0abc123".to_string(),
        output: Some(output.clone()),
        key: None,
        quick: false,
    };

    let outcome = connect(
        &request,
        &inventory,
        &no_config_locator(),
        &NoPrompt,
        &mut clipboard,
    )
    .await
    .unwrap();

    assert!(!outcome.password_copied);
    assert_eq!(clipboard.contents, None);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("full address:s:ec2-52-1-2-3.compute-1.amazonaws.com\n"));
}

#[tokio::test]
async fn test_connect_with_key_quick_populates_clipboard() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("i-0abc123.rdp");
    let (key_path, blob) = key_and_blob(&temp_dir, "Adm1nPassw0rd!");

    let inventory = FakeInventory {
        data: InstanceData {
            address: "203.0.113.7".to_string(),
            encrypted_password: blob,
        },
    };
    let mut clipboard = RecordingClipboard::default();

    let request = ConnectRequest {
        instance_id: "i-0abc123".to_string(),
        output: Some(output.clone()),
        key: Some(key_path),
        quick: true,
    };

    // NoPrompt panics if consulted, proving --quick uses the empty passphrase
    let outcome = connect(
        &request,
        &inventory,
        &no_config_locator(),
        &NoPrompt,
        &mut clipboard,
    )
    .await
    .unwrap();

    assert!(outcome.password_copied);
    assert_eq!(outcome.clipboard_warning, None);
    assert_eq!(clipboard.contents.as_deref(), Some("Adm1nPassw0rd!"));
    assert!(output.exists());
}

#[tokio::test]
async fn test_key_from_profile_config_is_used() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.rdp");
    let (key_path, blob) = key_and_blob(&temp_dir, "FromConfig!");

    let config_path = temp_dir.path().join("config");
    std::fs::write(
        &config_path,
        format!("[default]\nec2rdp_key = {}\n", key_path.display()),
    )
    .unwrap();

    let inventory = FakeInventory {
        data: InstanceData {
            address: "203.0.113.7".to_string(),
            encrypted_password: blob,
        },
    };
    let mut clipboard = RecordingClipboard::default();

    let request = ConnectRequest {
        instance_id: "i-0abc123".to_string(),
        output: Some(output),
        key: None,
        quick: true,
    };

    let locator = KeyLocator::with_config_path(None, config_path);
    let outcome = connect(&request, &inventory, &locator, &NoPrompt, &mut clipboard)
        .await
        .unwrap();

    assert!(outcome.password_copied);
    assert_eq!(clipboard.contents.as_deref(), Some("FromConfig!"));
}

#[tokio::test]
async fn test_nonexistent_instance_is_not_found() {
    let temp_dir = tempdir().unwrap();

    let request = ConnectRequest {
        instance_id: "i-doesnotexist".to_string(),
        output: Some(temp_dir.path().join("out.rdp")),
        key: None,
        quick: false,
    };

    let err = connect(
        &request,
        &EmptyInventory,
        &no_config_locator(),
        &NoPrompt,
        &mut RecordingClipboard::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        Ec2RdpError::Provider(ProviderError::NotFound { .. })
    ));
    assert!(!temp_dir.path().join("out.rdp").exists());
}

#[tokio::test]
async fn test_clipboard_failure_still_writes_file() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.rdp");
    let (key_path, blob) = key_and_blob(&temp_dir, "Adm1nPassw0rd!");

    let inventory = FakeInventory {
        data: InstanceData {
            address: "203.0.113.7".to_string(),
            encrypted_password: blob,
        },
    };

    let request = ConnectRequest {
        instance_id: "i-0abc123".to_string(),
        output: Some(output.clone()),
        key: Some(key_path),
        quick: true,
    };

    let outcome = connect(
        &request,
        &inventory,
        &no_config_locator(),
        &NoPrompt,
        &mut HeadlessClipboard,
    )
    .await
    .unwrap();

    assert!(!outcome.password_copied);
    assert!(outcome.clipboard_warning.is_some());
    assert!(output.exists());
}

#[tokio::test]
async fn test_missing_password_data_with_key_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let (key_path, _blob) = key_and_blob(&temp_dir, "unused");

    let inventory = FakeInventory {
        data: InstanceData {
            address: "203.0.113.7".to_string(),
            encrypted_password: String::new(),
        },
    };

    let request = ConnectRequest {
        instance_id: "i-0abc123".to_string(),
        output: Some(temp_dir.path().join("out.rdp")),
        key: Some(key_path),
        quick: true,
    };

    let err = connect(
        &request,
        &inventory,
        &no_config_locator(),
        &NoPrompt,
        &mut RecordingClipboard::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        Ec2RdpError::Provider(ProviderError::PasswordDataUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_nested_output_directory_is_created() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("sessions").join("prod").join("out.rdp");

    let inventory = FakeInventory {
        data: InstanceData {
            address: "test.example.com".to_string(),
            encrypted_password: String::new(),
        },
    };

    let request = ConnectRequest {
        instance_id: "i-0abc123".to_string(),
        output: Some(output.clone()),
        key: None,
        quick: false,
    };

    connect(
        &request,
        &inventory,
        &no_config_locator(),
        &NoPrompt,
        &mut RecordingClipboard::default(),
    )
    .await
    .unwrap();

    assert!(output.exists());
}
