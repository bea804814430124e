//! Error types for the ec2rdp CLI tool
//!
//! This module defines all error types used throughout the application,
//! providing consistent error handling and user-friendly error messages.

use thiserror::Error;

/// Main error type for the ec2rdp application
#[derive(Error, Debug)]
pub enum Ec2RdpError {
    /// Errors related to the AWS shared config file
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors returned by the EC2 provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Errors related to private key loading
    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    /// Errors related to password decryption
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Errors related to the system clipboard
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// AWS shared config file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed config file {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("Failed to read config file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("HOME environment variable not set")]
    HomeNotSet,
}

/// EC2 lookup errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Instance {instance_id} not found")]
    NotFound { instance_id: String },

    #[error("Instance {instance_id} has no public address")]
    NoPublicAddress { instance_id: String },

    #[error("Password data for {instance_id} is not available yet")]
    PasswordDataUnavailable { instance_id: String },

    #[error("EC2 request failed: {message}")]
    Api { message: String },
}

/// Private key loading errors
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse key file {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Failed to decrypt key file {path} (wrong passphrase?)")]
    BadPassphrase { path: String },
}

/// Password decryption errors
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Password data is not valid base64: {message}")]
    InvalidBase64 { message: String },

    #[error("RSA decryption failed (wrong key?)")]
    DecryptionFailed,

    #[error("Decrypted password is not valid UTF-8")]
    InvalidUtf8,
}

/// System clipboard errors
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {message}")]
    Unavailable { message: String },

    #[error("Failed to place text on clipboard: {message}")]
    SetFailed { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Ec2RdpError>;
