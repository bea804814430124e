//! EC2-backed instance inventory
//!
//! Wraps the AWS SDK with explicit configuration overrides instead of
//! mutating the process environment. Credential resolution otherwise
//! follows the SDK's default provider chain.

use crate::error::{Ec2RdpError, ProviderError};
use crate::provider::{InstanceData, InstanceInventory};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_ec2::config::Credentials;
use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use tracing::{debug, warn};

/// Explicit AWS configuration overrides from the command line
///
/// Each field is applied only when supplied; anything unset falls back to
/// the SDK's own resolution (environment, shared config, instance metadata).
#[derive(Debug, Default, Clone)]
pub struct AwsOptions {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl AwsOptions {
    /// Load an SDK configuration with these overrides applied
    pub async fn load(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            let provider =
                RegionProviderChain::first_try(Region::new(region.clone())).or_default_provider();
            loader = loader.region(provider);
        }

        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }

        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => {
                loader = loader.credentials_provider(Credentials::new(
                    id.clone(),
                    secret.clone(),
                    None,
                    None,
                    "ec2rdp-cli-flags",
                ));
            }
            (Some(_), None) | (None, Some(_)) => {
                // An access key pair is only usable as a pair
                warn!(
                    "Ignoring partial static credentials; both --aws-access-key-id \
                     and --aws-secret-access-key are required"
                );
            }
            (None, None) => {}
        }

        loader.load().await
    }
}

/// Inventory lookup backed by the EC2 API
pub struct Ec2Inventory {
    client: aws_sdk_ec2::Client,
}

impl Ec2Inventory {
    /// Create an inventory over a loaded SDK configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_ec2::Client::new(config),
        }
    }
}

#[async_trait]
impl InstanceInventory for Ec2Inventory {
    async fn describe(&self, instance_id: &str) -> Result<InstanceData, Ec2RdpError> {
        debug!("Describing instance {}", instance_id);

        let described = self
            .client
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| classify_sdk_error(instance_id, e))?;

        let instance = described
            .reservations()
            .first()
            .and_then(|reservation| reservation.instances().first())
            .ok_or_else(|| ProviderError::NotFound {
                instance_id: instance_id.to_string(),
            })?;

        let address = instance
            .public_dns_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| {
                instance
                    .public_ip_address()
                    .filter(|ip| !ip.is_empty())
                    .map(str::to_string)
            })
            .ok_or_else(|| ProviderError::NoPublicAddress {
                instance_id: instance_id.to_string(),
            })?;

        debug!("Fetching password data for {}", instance_id);

        let password = self
            .client
            .get_password_data()
            .instance_id(instance_id)
            .send()
            .await
            .map_err(|e| classify_sdk_error(instance_id, e))?;

        let encrypted_password = password.password_data().unwrap_or_default().trim().to_string();

        Ok(InstanceData {
            address,
            encrypted_password,
        })
    }
}

/// Map an SDK error to the provider error taxonomy
///
/// Unknown or missing instance ids surface as `NotFound`; everything else
/// (transport, auth, throttling) is a generic API failure.
fn classify_sdk_error<E>(instance_id: &str, err: SdkError<E>) -> Ec2RdpError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let not_found = err
        .meta()
        .code()
        .is_some_and(|code| code.starts_with("InvalidInstanceID"));

    if not_found {
        return ProviderError::NotFound {
            instance_id: instance_id.to_string(),
        }
        .into();
    }

    ProviderError::Api {
        message: DisplayErrorContext(err).to_string(),
    }
    .into()
}
