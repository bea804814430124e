//! AWS shared config file lookup
//!
//! The AWS CLI keeps per-profile settings in an INI file at `~/.aws/config`.
//! ec2rdp reads an optional `ec2rdp_key` entry from the active profile
//! section to locate a default private key, so operators do not have to
//! pass `-k` on every invocation.

use crate::error::{ConfigError, Ec2RdpError};
use ini::Ini;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config entry holding the default private key path for a profile
const KEY_ENTRY: &str = "ec2rdp_key";

/// Section name used for the default profile
const DEFAULT_SECTION: &str = "default";

/// Resolves the private key path to use for a run
///
/// An explicit path always wins. Otherwise the active profile section of
/// the shared config file is consulted; a missing file or missing entry
/// means no key is used.
pub struct KeyLocator {
    /// Override for the config file location, used by tests
    config_path: Option<PathBuf>,
    /// Active profile name; `None` means the default profile
    profile: Option<String>,
}

impl KeyLocator {
    /// Create a locator for the active profile
    ///
    /// The profile comes from the `--aws-profile` flag if given, falling
    /// back to the `AWS_PROFILE` environment variable, falling back to the
    /// default profile.
    pub fn new(profile_override: Option<String>) -> Self {
        let profile = profile_override.or_else(|| std::env::var("AWS_PROFILE").ok());
        Self {
            config_path: None,
            profile,
        }
    }

    /// Create a locator reading a specific config file (for tests)
    pub fn with_config_path(profile: Option<String>, config_path: PathBuf) -> Self {
        Self {
            config_path: Some(config_path),
            profile,
        }
    }

    /// Section name for the active profile
    ///
    /// The AWS CLI names non-default sections `profile <name>` while the
    /// default profile section is just `default`.
    fn section_name(&self) -> String {
        match &self.profile {
            Some(name) => format!("profile {}", name),
            None => DEFAULT_SECTION.to_string(),
        }
    }

    /// Resolve the key path to use, or `None` if no key should be used
    ///
    /// An explicit path is returned unchanged without an existence check;
    /// validation happens when the key is actually read.
    pub fn resolve(&self, explicit: Option<PathBuf>) -> Result<Option<PathBuf>, Ec2RdpError> {
        if let Some(path) = explicit {
            debug!("Using explicit key path {:?}", path);
            return Ok(Some(path));
        }

        let config_path = match &self.config_path {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };

        if !config_path.exists() {
            debug!("No shared config file at {:?}", config_path);
            return Ok(None);
        }

        let config = Ini::load_from_file(&config_path).map_err(|e| match e {
            ini::Error::Io(io) => ConfigError::ReadFailed {
                path: config_path.to_string_lossy().to_string(),
                message: io.to_string(),
            },
            ini::Error::Parse(parse) => ConfigError::Malformed {
                path: config_path.to_string_lossy().to_string(),
                message: parse.to_string(),
            },
        })?;

        let section = self.section_name();
        let key = config
            .section(Some(section.as_str()))
            .and_then(|props| props.get(KEY_ENTRY))
            .map(PathBuf::from);

        match &key {
            Some(path) => debug!("Found {} = {:?} in section [{}]", KEY_ENTRY, path, section),
            None => debug!("No {} entry in section [{}]", KEY_ENTRY, section),
        }

        Ok(key)
    }
}

/// Default location of the AWS shared config file
fn default_config_path() -> Result<PathBuf, Ec2RdpError> {
    let home = std::env::var("HOME").map_err(|_| ConfigError::HomeNotSet)?;
    Ok(Path::new(&home).join(".aws").join("config"))
}
