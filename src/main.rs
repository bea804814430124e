//! ec2rdp - EC2 Windows RDP access tool
//!
//! Fetches an EC2 instance's encrypted administrator password, decrypts it
//! locally with a private key, copies it to the clipboard, and writes an
//! `.rdp` connection file for the instance.

use clap::Parser;
use ec2rdp_core::{error::Ec2RdpError, init_logging};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "ec2rdp")]
#[command(about = "Quickly access AWS EC2 Windows instances through RDP")]
struct Cli {
    /// The instance id to connect to
    #[arg(required_unless_present = "clipboard_daemon")]
    instance_id: Option<String>,

    /// The path for the rdp file to be created
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// The path to the private key file to decrypt the password
    #[arg(short, long)]
    key: Option<PathBuf>,

    /// Do not ask for the passphrase for the key file
    #[arg(short, long)]
    quick: bool,

    /// The profile name for AWS credentials
    #[arg(long)]
    aws_profile: Option<String>,

    /// The access key id for AWS
    #[arg(long)]
    aws_access_key_id: Option<String>,

    /// The secret access key for AWS
    #[arg(long)]
    aws_secret_access_key: Option<String>,

    /// The region for AWS
    #[arg(long)]
    aws_region: Option<String>,

    /// Do not open the rdp file after writing it
    #[arg(long)]
    no_open: bool,

    /// Hold the clipboard selection for a password read from stdin
    #[arg(long, hide = true)]
    clipboard_daemon: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let cli = Cli::parse();

    let result = if cli.clipboard_daemon {
        cli::clipboard::run_clipboard_daemon()
    } else {
        cli::connect::run_connect(cli).await
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            let exit_code = match e {
                // Configuration and key setup errors (exit code 2)
                Ec2RdpError::Config(_) | Ec2RdpError::Key(_) => 2,
                // Runtime errors (exit code 1)
                Ec2RdpError::Provider(_)
                | Ec2RdpError::Crypto(_)
                | Ec2RdpError::Clipboard(_)
                | Ec2RdpError::Io(_) => 1,
            };

            eprintln!("{}", e);
            std::process::exit(exit_code);
        }
    }
}
