//! CLI command implementations

pub mod clipboard;
pub mod connect;
