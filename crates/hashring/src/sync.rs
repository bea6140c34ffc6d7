//! Thread-safe wrapper around [`HashRing`].
//!
//! The registry and the virtual ring live behind a single
//! `parking_lot::RwLock`, so readers never observe one updated without
//! the other. Membership changes take the write lock; every query takes
//! the read lock and returns owned clones, so no guard escapes.

use parking_lot::RwLock;

use crate::config::RingConfig;
use crate::error::Result;
use crate::node::NodeIdentity;
use crate::partitioner::{Partitioner, PartitionerKind, SipPartitioner};
use crate::ring::HashRing;

/// A [`HashRing`] shareable across threads (typically via `Arc`).
#[derive(Debug)]
pub struct SyncHashRing<T, P = SipPartitioner> {
    inner: RwLock<HashRing<T, P>>,
}

impl<T: NodeIdentity + Clone> SyncHashRing<T, SipPartitioner> {
    pub fn new(replication_factor: isize) -> Self {
        Self::from_ring(HashRing::new(replication_factor))
    }
}

impl<T: NodeIdentity + Clone> SyncHashRing<T, PartitionerKind> {
    pub fn from_config(config: &RingConfig) -> Self {
        Self::from_ring(HashRing::from_config(config))
    }
}

impl<T: NodeIdentity + Clone, P: Partitioner> SyncHashRing<T, P> {
    /// Wraps an existing ring.
    pub fn from_ring(ring: HashRing<T, P>) -> Self {
        Self {
            inner: RwLock::new(ring),
        }
    }

    /// Unwraps the ring.
    pub fn into_inner(self) -> HashRing<T, P> {
        self.inner.into_inner()
    }

    pub fn add_node(&self, node: T) -> bool {
        self.inner.write().add_node(node)
    }

    pub fn add_nodes<I: IntoIterator<Item = T>>(&self, nodes: I) -> usize {
        self.inner.write().add_nodes(nodes)
    }

    pub fn remove_node(&self, node: &T) -> bool {
        self.inner.write().remove_node(node)
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    pub fn contains_node(&self, node: &T) -> bool {
        self.inner.read().contains_node(node)
    }

    pub fn locate_key(&self, key: &str) -> Result<T> {
        self.inner.read().locate_key(key).cloned()
    }

    pub fn closest_n(&self, key: &str, n: isize) -> Result<Vec<T>> {
        let ring = self.inner.read();
        let nodes = ring.closest_n(key, n)?;
        Ok(nodes.into_iter().cloned().collect())
    }

    pub fn closest_n_distinct(&self, key: &str, n: isize) -> Result<Vec<T>> {
        let ring = self.inner.read();
        let nodes = ring.closest_n_distinct(key, n)?;
        Ok(nodes.into_iter().cloned().collect())
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn nodes(&self) -> Vec<T> {
        self.inner.read().nodes().into_iter().cloned().collect()
    }

    pub fn replication_factor(&self) -> usize {
        self.inner.read().replication_factor()
    }

    pub fn token_count(&self) -> usize {
        self.inner.read().token_count()
    }

    /// Runs `f` against a consistent snapshot under the read lock.
    ///
    /// Use this to combine several queries without a membership change
    /// slipping in between them.
    pub fn read<R>(&self, f: impl FnOnce(&HashRing<T, P>) -> R) -> R {
        f(&*self.inner.read())
    }
}

impl<T: NodeIdentity + Clone, P: Partitioner> From<HashRing<T, P>> for SyncHashRing<T, P> {
    fn from(ring: HashRing<T, P>) -> Self {
        Self::from_ring(ring)
    }
}
