//! RSA decryption of the EC2 password-data blob

use crate::error::{CryptoError, Ec2RdpError, KeyError};
use crate::paths::expand_tilde;
use crate::types::{AdminPassword, Passphrase};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey};
use std::path::Path;
use tracing::debug;

/// Decrypt a base64-encoded password-data blob with a PEM private key
///
/// The passphrase is only consulted for encrypted PKCS#8 keys; plain
/// PKCS#1 and PKCS#8 keys load without it.
pub fn decrypt_password_data(
    key_path: &Path,
    passphrase: &Passphrase,
    encrypted_password: &str,
) -> Result<AdminPassword, Ec2RdpError> {
    let ciphertext = BASE64
        .decode(encrypted_password)
        .map_err(|e| CryptoError::InvalidBase64 {
            message: e.to_string(),
        })?;

    let key = load_private_key(key_path, passphrase)?;

    let plaintext = key
        .decrypt(Pkcs1v15Encrypt, &ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)?;

    let password = String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)?;

    Ok(AdminPassword::new(password))
}

/// Load an RSA private key from a PEM file, tilde-expanding the path
fn load_private_key(
    key_path: &Path,
    passphrase: &Passphrase,
) -> Result<RsaPrivateKey, Ec2RdpError> {
    let expanded = expand_tilde(key_path);
    let display_path = expanded.to_string_lossy().to_string();

    debug!("Loading private key from {:?}", expanded);

    let pem = std::fs::read_to_string(&expanded).map_err(|e| KeyError::ReadFailed {
        path: display_path.clone(),
        message: e.to_string(),
    })?;

    if pem.contains("BEGIN ENCRYPTED PRIVATE KEY") {
        return RsaPrivateKey::from_pkcs8_encrypted_pem(&pem, passphrase.expose().as_bytes())
            .map_err(|_| {
                KeyError::BadPassphrase {
                    path: display_path,
                }
                .into()
            });
    }

    if pem.contains("Proc-Type") && pem.contains("ENCRYPTED") {
        // Legacy OpenSSL DEK-Info encryption predates PKCS#8
        return Err(KeyError::ParseFailed {
            path: display_path,
            message: "legacy OpenSSL-encrypted keys are not supported; \
                      convert with `openssl pkcs8 -topk8`"
                .to_string(),
        }
        .into());
    }

    RsaPrivateKey::from_pkcs1_pem(&pem)
        .or_else(|_| RsaPrivateKey::from_pkcs8_pem(&pem))
        .map_err(|e| {
            KeyError::ParseFailed {
                path: display_path,
                message: e.to_string(),
            }
            .into()
        })
}
