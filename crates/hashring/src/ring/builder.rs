//! Fluent construction of a populated ring.

use crate::config::{RingConfig, DEFAULT_REPLICATION_FACTOR};
use crate::node::NodeIdentity;
use crate::partitioner::{Partitioner, PartitionerKind, SipPartitioner};
use crate::ring::ring::HashRing;

/// Builder for a [`HashRing`].
///
/// ```rust
/// use hashring::RingBuilder;
/// use hashring::partitioner::Xxh3Partitioner;
///
/// let ring = RingBuilder::new()
///     .with_replicas(32)
///     .with_partitioner(Xxh3Partitioner)
///     .add_nodes(["cache-a", "cache-b", "cache-c"])
///     .build();
///
/// assert_eq!(ring.size(), 3);
/// assert_eq!(ring.token_count(), 96);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<T, P = SipPartitioner> {
    replication_factor: isize,
    partitioner: P,
    nodes: Vec<T>,
}

impl<T> RingBuilder<T, SipPartitioner> {
    pub fn new() -> Self {
        Self {
            replication_factor: DEFAULT_REPLICATION_FACTOR,
            partitioner: SipPartitioner,
            nodes: Vec::new(),
        }
    }
}

impl<T> Default for RingBuilder<T, SipPartitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RingBuilder<T, PartitionerKind> {
    /// Starts from a [`RingConfig`].
    pub fn from_config(config: &RingConfig) -> Self {
        Self {
            replication_factor: config.replication_factor,
            partitioner: config.partitioner,
            nodes: Vec::new(),
        }
    }
}

impl<T: NodeIdentity, P: Partitioner> RingBuilder<T, P> {
    /// Requested virtual positions per node (clamped on build).
    pub fn with_replicas(mut self, replication_factor: isize) -> Self {
        self.replication_factor = replication_factor;
        self
    }

    /// Swaps the hash function.
    pub fn with_partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<T, Q> {
        RingBuilder {
            replication_factor: self.replication_factor,
            partitioner,
            nodes: self.nodes,
        }
    }

    pub fn add_node(mut self, node: T) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn add_nodes<I: IntoIterator<Item = T>>(mut self, nodes: I) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Builds the ring. Duplicate identities collapse to the first one.
    pub fn build(self) -> HashRing<T, P> {
        let mut ring = HashRing::with_partitioner(self.replication_factor, self.partitioner);
        ring.add_nodes(self.nodes);
        ring
    }
}
