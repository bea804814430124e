//! Connect command implementation
//!
//! Wires the real collaborators (EC2 client, console prompt, system
//! clipboard) into the connect flow and reports results.

use crate::Cli;
#[cfg(target_os = "linux")]
use crate::cli::clipboard::DetachedClipboard;
#[cfg(not(target_os = "linux"))]
use ec2rdp_core::clipboard::SystemClipboard;
use ec2rdp_core::config::KeyLocator;
use ec2rdp_core::error::Ec2RdpError;
use ec2rdp_core::prompt::ConsolePrompt;
use ec2rdp_core::provider::{AwsOptions, Ec2Inventory};
use ec2rdp_core::session::{self, ConnectRequest};
use tracing::warn;

/// Run the connect flow with production collaborators
pub async fn run_connect(cli: Cli) -> Result<(), Ec2RdpError> {
    // clap requires the instance id for every invocation that reaches here
    let Some(instance_id) = cli.instance_id else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "an instance id is required",
        )
        .into());
    };

    let aws = AwsOptions {
        profile: cli.aws_profile.clone(),
        region: cli.aws_region,
        access_key_id: cli.aws_access_key_id,
        secret_access_key: cli.aws_secret_access_key,
    };

    let sdk_config = aws.load().await;
    let inventory = Ec2Inventory::new(&sdk_config);
    let locator = KeyLocator::new(cli.aws_profile);
    let prompt = ConsolePrompt::new();

    // On Linux the selection dies with the setting process, so the
    // password is handed to a detached child that outlives this one
    #[cfg(target_os = "linux")]
    let mut clipboard = DetachedClipboard::new()?;
    #[cfg(not(target_os = "linux"))]
    let mut clipboard = SystemClipboard::new();

    let request = ConnectRequest {
        instance_id,
        output: cli.output,
        key: cli.key,
        quick: cli.quick,
    };

    let outcome = session::connect(&request, &inventory, &locator, &prompt, &mut clipboard).await?;

    if outcome.password_copied {
        println!("Password copied to clipboard");
    }
    if let Some(warning) = &outcome.clipboard_warning {
        eprintln!("Warning: password not copied to clipboard: {}", warning);
    }

    println!("RDP file written to: {}", outcome.output_path.display());

    if !cli.no_open {
        if let Err(e) = open::that(&outcome.output_path) {
            warn!("Could not open {}: {}", outcome.output_path.display(), e);
        }
    }

    Ok(())
}
