//! CLI subcommands.

use std::fmt;

use anyhow::Context;
use clap::Subcommand;
use hashring::{HashRing, RingConfig};
use tracing::info;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Integer nodes 1..=N: locate, list closest, remove one, locate again.
    Demo {
        #[arg(long, default_value_t = 20)]
        nodes: u32,
        #[arg(long, default_value = "abcdefg")]
        key: String,
        #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
        closest: isize,
        #[arg(long, default_value_t = 5)]
        remove: u32,
    },
    /// Print the owner of each key.
    Locate {
        /// Node identity (repeatable).
        #[arg(long = "node", required = true)]
        nodes: Vec<String>,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print the N ring positions (or distinct nodes) following a key.
    Closest {
        /// Node identity (repeatable).
        #[arg(long = "node", required = true)]
        nodes: Vec<String>,
        /// Skip positions whose node was already listed.
        #[arg(long)]
        distinct: bool,
        key: String,
        #[arg(allow_negative_numbers = true)]
        n: isize,
    },
}

/// Labelled output lines of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub lines: Vec<(String, String)>,
}

impl CommandResult {
    fn push(&mut self, label: impl Into<String>, value: impl ToString) {
        self.lines.push((label.into(), value.to_string()));
    }

    /// Value of the first line with `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.lines {
            writeln!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Command {
    pub fn execute(&self, config: &RingConfig) -> anyhow::Result<CommandResult> {
        let mut out = CommandResult::default();
        match self {
            Command::Demo {
                nodes,
                key,
                closest,
                remove,
            } => {
                let mut ring = HashRing::from_config(config);
                ring.add_nodes(1..=*nodes);
                info!(nodes = ring.size(), "ring populated");

                out.push("replication factor", ring.replication_factor());
                out.push("partitioner", ring.partitioner_name());
                out.push("size", ring.size());
                out.push("nodes", join(ring.nodes()));
                out.push("contains 8", ring.contains_node(&8));

                let owner = *ring
                    .locate_key(key)
                    .with_context(|| format!("locating {}", key))?;
                out.push("owner", owner);
                out.push(
                    format!("closest {}", closest),
                    join(ring.closest_n(key, *closest)?),
                );

                out.push(format!("removed {}", remove), ring.remove_node(remove));
                out.push("size after removal", ring.size());
                let owner = ring
                    .locate_key(key)
                    .with_context(|| format!("locating {} after removal", key))?;
                out.push("owner after removal", owner);
            }
            Command::Locate { nodes, keys } => {
                let mut ring = HashRing::from_config(config);
                ring.add_nodes(nodes.iter().cloned());
                for key in keys {
                    out.push(key.clone(), ring.locate_key(key)?);
                }
            }
            Command::Closest {
                nodes,
                distinct,
                key,
                n,
            } => {
                let mut ring = HashRing::from_config(config);
                ring.add_nodes(nodes.iter().cloned());
                let found = if *distinct {
                    ring.closest_n_distinct(key, *n)?
                } else {
                    ring.closest_n(key, *n)?
                };
                out.push(key.clone(), join(found));
            }
        }
        Ok(out)
    }
}
