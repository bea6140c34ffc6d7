//! Command-line configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hashring::{PartitionerKind, RingConfig};
use tracing::{debug, Level};

use crate::commands::{Command, CommandResult};

/// Explore a consistent hash ring from the command line.
#[derive(Debug, Parser)]
#[command(name = "hashring", version, about)]
pub struct CliConfig {
    /// Virtual positions per node (values below 5 are raised to 5).
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub replicas: Option<isize>,

    /// Hash function: sip or xxh3.
    #[arg(long, global = true)]
    pub partitioner: Option<PartitionerKind>,

    /// JSON ring configuration; flags override its fields.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log verbosity (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Installs a stderr `tracing` subscriber at the requested level.
    pub fn init_logging(&self) {
        // A subscriber may already be installed when embedded; keep it.
        let _ = tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Resolves the ring configuration: file first, then flag overrides.
    pub fn ring_config(&self) -> anyhow::Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading ring config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing ring config {}", path.display()))?
            }
            None => RingConfig::default(),
        };

        if let Some(replicas) = self.replicas {
            config.replication_factor = replicas;
        }
        if let Some(partitioner) = self.partitioner {
            config.partitioner = partitioner;
        }

        debug!(?config, "resolved ring config");
        Ok(config)
    }

    pub fn run(&self) -> anyhow::Result<CommandResult> {
        let config = self.ring_config()?;
        self.command.execute(&config)
    }
}
