//! Configuration module
//!
//! Resolves the default private key path from the AWS shared config file.

pub mod aws_profile;

pub use aws_profile::KeyLocator;
