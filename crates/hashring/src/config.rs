//! Ring configuration and tuning constants.

use crate::partitioner::PartitionerKind;
use serde::{Deserialize, Serialize};

/// Lowest replication factor a ring will run with.
///
/// Fewer virtual positions per node leave large arcs of the key space
/// owned by a single node. Requests below this are clamped up.
pub const MIN_REPLICAS: usize = 5;

/// Offset added to each replica index before it is appended to the node
/// identity, so replica `0` does not produce a degenerate short suffix.
pub const REPLICA_SALT: usize = 111;

/// Separator between a node identity and its salted replica index.
pub const REPLICA_SEPARATOR: &str = " - RepN: ";

/// Replication factor used when none is configured.
pub const DEFAULT_REPLICATION_FACTOR: isize = 10;

/// Clamps a requested replication factor to `MIN_REPLICAS`.
///
/// Negative requests are valid input and clamp like any other low value.
pub fn clamp_replication_factor(requested: isize) -> usize {
    usize::try_from(requested).map_or(MIN_REPLICAS, |n| n.max(MIN_REPLICAS))
}

/// Serializable ring settings.
///
/// ```json
/// { "replication_factor": 64, "partitioner": "xxh3" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Requested virtual positions per real node, before clamping.
    pub replication_factor: isize,
    /// Hash function for keys and node identities.
    pub partitioner: PartitionerKind,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replication_factor: DEFAULT_REPLICATION_FACTOR,
            partitioner: PartitionerKind::default(),
        }
    }
}

impl RingConfig {
    pub fn new(replication_factor: isize) -> Self {
        Self {
            replication_factor,
            ..Self::default()
        }
    }

    pub fn with_partitioner(mut self, partitioner: PartitionerKind) -> Self {
        self.partitioner = partitioner;
        self
    }

    /// The replication factor a ring built from this config will use.
    pub fn effective_replication_factor(&self) -> usize {
        clamp_replication_factor(self.replication_factor)
    }
}
