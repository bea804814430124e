//! Core library for the ec2rdp CLI tool
//!
//! This crate provides instance lookup, password decryption, and connection
//! file generation for accessing EC2 Windows instances over RDP.

pub mod error;
pub mod paths;
pub mod types;

pub mod clipboard;
pub mod config;
pub mod crypto;
pub mod prompt;
pub mod provider;
pub mod rdp;
pub mod session;

/// Initialize logging infrastructure
///
/// Sets up tracing with systemd journal logging for production use.
/// In development, logs to stderr with appropriate formatting.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Try to use systemd journal logging if available
    #[cfg(target_os = "linux")]
    {
        if std::env::var("JOURNAL_STREAM").is_ok() {
            // We're running under systemd, use journal logging
            let journal_layer = tracing_journald::layer()?;
            tracing_subscriber::registry()
                .with(journal_layer)
                .with(tracing_subscriber::filter::LevelFilter::INFO)
                .init();
            return Ok(());
        }
    }

    // Fallback to stderr logging, kept at WARN so confirmations on stdout
    // stay clean for interactive use
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::filter::LevelFilter::WARN)
        .init();

    Ok(())
}
