//! CLI tool for exploring consistent hash rings.
//!
//! Provides commands for:
//! - Running the end-to-end demonstration scenario
//! - Locating the owners of keys
//! - Listing the nodes closest to a key

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
