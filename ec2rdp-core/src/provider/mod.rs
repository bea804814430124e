//! Instance inventory abstraction
//!
//! The cloud provider is an external collaborator behind a narrow trait so
//! the connect flow can be exercised with fakes.

use crate::error::Ec2RdpError;
use async_trait::async_trait;

pub mod ec2;

pub use ec2::{AwsOptions, Ec2Inventory};

/// Data fetched for one instance: where to connect and what to decrypt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceData {
    /// Public address of the instance (DNS name, or IP as fallback)
    pub address: String,
    /// Base64-encoded encrypted administrator password, trimmed
    ///
    /// Empty when the provider has not generated password data yet.
    pub encrypted_password: String,
}

/// Read-only inventory lookup for a single instance
#[async_trait]
pub trait InstanceInventory: Send + Sync {
    /// Fetch the public address and encrypted password blob for an instance
    async fn describe(&self, instance_id: &str) -> Result<InstanceData, Ec2RdpError>;
}
