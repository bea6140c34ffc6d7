//! Hash ring data structure.
//!
//! Two ordered maps are maintained together:
//!
//! ```text
//! nodes:  Token(hash(identity))          -> T       (registry, one per real node)
//! vnodes: Token(hash(identity - RepN: i)) -> Token   (ring, replication_factor per node)
//! ```
//!
//! Ring entries point at the registry key of their owner rather than
//! holding another copy of the node, so a walk over the ring can tell
//! real nodes apart without hashing them again.

use std::collections::{BTreeMap, HashSet};
use std::ops::Bound::{Excluded, Included, Unbounded};

use tracing::{debug, trace};

use crate::config::{clamp_replication_factor, RingConfig};
use crate::error::{Error, Result};
use crate::node::NodeIdentity;
use crate::partitioner::{Partitioner, PartitionerKind, SipPartitioner};
use crate::token::Token;
use crate::vnode::{replica_tokens, VirtualNode};

/// Consistent hash ring over nodes of type `T`.
///
/// Not synchronized: mutation takes `&mut self`. Wrap it in
/// [`SyncHashRing`](crate::SyncHashRing) to share it between threads.
///
/// # Example
///
/// ```rust
/// use hashring::HashRing;
///
/// let mut ring = HashRing::new(10);
/// for id in 1..=8 {
///     ring.add_node(id);
/// }
/// let owner = ring.locate_key("abcdefg").unwrap();
/// assert!((1..=8).contains(owner));
/// ```
#[derive(Debug, Clone)]
pub struct HashRing<T, P = SipPartitioner> {
    /// Registry: real-node token -> node.
    nodes: BTreeMap<Token, T>,
    /// Virtual ring: virtual token -> owner's registry token.
    vnodes: BTreeMap<Token, Token>,
    replication_factor: usize,
    partitioner: P,
}

impl<T: NodeIdentity> HashRing<T, SipPartitioner> {
    /// Creates an empty ring using SipHash.
    ///
    /// `replication_factor` below [`MIN_REPLICAS`](crate::config::MIN_REPLICAS),
    /// negative values included, is clamped up. Never fails.
    pub fn new(replication_factor: isize) -> Self {
        Self::with_partitioner(replication_factor, SipPartitioner)
    }
}

impl<T: NodeIdentity> HashRing<T, PartitionerKind> {
    /// Creates an empty ring from configuration.
    pub fn from_config(config: &RingConfig) -> Self {
        Self::with_partitioner(config.replication_factor, config.partitioner)
    }
}

impl<T: NodeIdentity, P: Partitioner> HashRing<T, P> {
    /// Creates an empty ring with a custom partitioner.
    pub fn with_partitioner(replication_factor: isize, partitioner: P) -> Self {
        Self {
            nodes: BTreeMap::new(),
            vnodes: BTreeMap::new(),
            replication_factor: clamp_replication_factor(replication_factor),
            partitioner,
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Adds a node and its virtual positions.
    ///
    /// Returns `false` without touching the ring if a node with the same
    /// identity is already registered.
    pub fn add_node(&mut self, node: T) -> bool {
        let identity = node.identity();
        let token = self.partitioner.partition_str(&identity);
        if self.nodes.contains_key(&token) {
            trace!(%identity, "node already on ring");
            return false;
        }

        for vtoken in replica_tokens(&self.partitioner, &identity, self.replication_factor) {
            // Collisions are last-write-wins.
            self.vnodes.insert(vtoken, token);
        }
        self.nodes.insert(token, node);

        debug!(
            %identity,
            %token,
            replicas = self.replication_factor,
            nodes = self.nodes.len(),
            "added node to ring"
        );
        true
    }

    /// Adds every node from `nodes`, returning how many were new.
    pub fn add_nodes<I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        nodes
            .into_iter()
            .fold(0, |added, node| added + usize::from(self.add_node(node)))
    }

    /// Removes a node and all of its virtual positions.
    ///
    /// Returns `false` if the node was not on the ring.
    pub fn remove_node(&mut self, node: &T) -> bool {
        let identity = node.identity();
        let token = self.partitioner.partition_str(&identity);
        if self.nodes.remove(&token).is_none() {
            trace!(%identity, "node not on ring");
            return false;
        }

        for vtoken in replica_tokens(&self.partitioner, &identity, self.replication_factor) {
            self.vnodes.remove(&vtoken);
        }

        debug!(%identity, %token, nodes = self.nodes.len(), "removed node from ring");
        true
    }

    /// Removes every node, returning the ring to the empty state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.vnodes.clear();
        debug!("cleared ring");
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// True if a node with the same identity is on the ring.
    pub fn contains_node(&self, node: &T) -> bool {
        let token = self.partitioner.partition_str(&node.identity());
        self.nodes.contains_key(&token)
    }

    /// Finds the node owning `key`.
    ///
    /// The owner is the node of the first virtual position strictly after
    /// `hash(key)`, wrapping to the lowest position past the end of the
    /// hash space.
    pub fn locate_key(&self, key: &str) -> Result<&T> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyRing);
        }

        let token = self.key_token(key);
        let owner = self
            .clockwise_from(token)
            .next()
            .and_then(|(_, owner)| self.nodes.get(owner))
            .ok_or(Error::EmptyRing)?;

        trace!(key, %token, "located key");
        Ok(owner)
    }

    /// Returns the owners of the `n` ring positions following `key`.
    ///
    /// The walk starts at the position [`locate_key`](Self::locate_key)
    /// would pick and steps through `n` consecutive virtual positions,
    /// wrapping at the end of the ring. Positions are not deduplicated:
    /// several consecutive positions may belong to the same real node, so
    /// the result can repeat a node. Use
    /// [`closest_n_distinct`](Self::closest_n_distinct) for `n` different
    /// nodes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `n` is negative or greater than
    ///   [`size`](Self::size)
    /// - [`Error::EmptyRing`] if the ring is empty and `n > 0`
    pub fn closest_n(&self, key: &str, n: isize) -> Result<Vec<&T>> {
        let n = self.check_count(n)?;
        if n == 0 {
            return Ok(Vec::new());
        }

        let token = self.key_token(key);
        Ok(self
            .clockwise_from(token)
            .cycle()
            .take(n)
            .filter_map(|(_, owner)| self.nodes.get(owner))
            .collect())
    }

    /// Returns the first `n` distinct real nodes clockwise from `key`.
    ///
    /// Same validation as [`closest_n`](Self::closest_n). The first
    /// element is always the [`locate_key`](Self::locate_key) owner.
    pub fn closest_n_distinct(&self, key: &str, n: isize) -> Result<Vec<&T>> {
        let n = self.check_count(n)?;
        if n == 0 {
            return Ok(Vec::new());
        }

        let token = self.key_token(key);
        let mut seen = HashSet::with_capacity(n);
        let mut found = Vec::with_capacity(n);

        // One lap visits every position, so every registered node.
        for (_, owner) in self.clockwise_from(token) {
            if !seen.insert(*owner) {
                continue;
            }
            if let Some(node) = self.nodes.get(owner) {
                found.push(node);
                if found.len() == n {
                    break;
                }
            }
        }

        Ok(found)
    }

    /// Number of real nodes. Virtual positions are not counted.
    #[inline]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All real nodes, ordered by the hash of their identity.
    pub fn nodes(&self) -> Vec<&T> {
        self.nodes.values().collect()
    }

    /// Virtual positions per real node, after clamping.
    #[inline]
    pub fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    /// Number of virtual positions on the ring.
    #[inline]
    pub fn token_count(&self) -> usize {
        self.vnodes.len()
    }

    /// Iterates over the virtual positions in ring order.
    pub fn vnodes(&self) -> impl Iterator<Item = VirtualNode<'_, T>> + '_ {
        self.vnodes.iter().filter_map(move |(vtoken, owner)| {
            self.nodes
                .get(owner)
                .map(|node| VirtualNode::new(*vtoken, node))
        })
    }

    /// The ring position a key hashes to.
    #[inline]
    pub fn key_token(&self, key: &str) -> Token {
        self.partitioner.partition_str(key)
    }

    pub fn partitioner(&self) -> &P {
        &self.partitioner
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Every ring entry exactly once, starting strictly after `token` and
    /// wrapping around.
    fn clockwise_from(
        &self,
        token: Token,
    ) -> impl Iterator<Item = (&Token, &Token)> + Clone + '_ {
        self.vnodes
            .range((Excluded(token), Unbounded))
            .chain(self.vnodes.range((Unbounded, Included(token))))
    }

    fn check_count(&self, n: isize) -> Result<usize> {
        let count = usize::try_from(n).map_err(|_| {
            Error::InvalidArgument(format!("node count must be non-negative, got {}", n))
        })?;
        if count == 0 {
            return Ok(0);
        }
        if self.nodes.is_empty() {
            return Err(Error::EmptyRing);
        }
        if count > self.nodes.len() {
            return Err(Error::InvalidArgument(format!(
                "requested {} nodes but the ring holds {}",
                count,
                self.nodes.len()
            )));
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_REPLICAS;
    use crate::partitioner::Xxh3Partitioner;

    #[test]
    fn test_token_count_tracks_replication() {
        let mut ring = HashRing::new(7);
        ring.add_nodes(1..=4);
        assert_eq!(ring.token_count(), 4 * 7);

        ring.remove_node(&2);
        assert_eq!(ring.token_count(), 3 * 7);
    }

    #[test]
    fn test_clamp_applies_to_virtual_positions() {
        let mut ring = HashRing::new(1);
        ring.add_node("only");
        assert_eq!(ring.replication_factor(), MIN_REPLICAS);
        assert_eq!(ring.token_count(), MIN_REPLICAS);
    }

    #[test]
    fn test_every_vnode_belongs_to_registered_node() {
        let mut ring = HashRing::new(16);
        ring.add_nodes(["a", "b", "c", "d"]);
        ring.remove_node(&"c");

        let owners: HashSet<&str> = ring.vnodes().map(|v| *v.node).collect();
        let expected: HashSet<&str> = ["a", "b", "d"].into_iter().collect();
        assert_eq!(owners, expected);
        assert_eq!(ring.vnodes().count(), ring.token_count());
    }

    #[test]
    fn test_vnodes_in_ring_order() {
        let mut ring = HashRing::new(8);
        ring.add_nodes(1..=3);
        let tokens: Vec<Token> = ring.vnodes().map(|v| v.token).collect();
        let mut sorted = tokens.clone();
        sorted.sort();
        assert_eq!(tokens, sorted);
    }

    #[test]
    fn test_locate_is_strict_successor() {
        let mut ring = HashRing::new(5);
        ring.add_nodes(1..=5);
        let vnodes: Vec<(Token, i32)> = ring.vnodes().map(|v| (v.token, *v.node)).collect();

        // A key that hashes exactly onto a position belongs to the next one.
        for window in vnodes.windows(2) {
            let (at, _) = window[0];
            let (_, next_owner) = window[1];
            let owner = ring
                .clockwise_from(at)
                .next()
                .and_then(|(_, t)| ring.nodes.get(t))
                .copied();
            assert_eq!(owner, Some(next_owner));
        }

        // Past the last position the walk wraps to the first.
        let (last, _) = *vnodes.last().unwrap();
        let (_, first_owner) = vnodes[0];
        let wrapped = ring
            .clockwise_from(last)
            .next()
            .and_then(|(_, t)| ring.nodes.get(t))
            .copied();
        assert_eq!(wrapped, Some(first_owner));
    }

    #[test]
    fn test_locate_matches_manual_successor() {
        let mut ring = HashRing::new(10);
        ring.add_nodes(1..=8);

        for key in ["abcdefg", "user:42", "", "session/9f1c"] {
            let h = ring.key_token(key);
            let expected = ring
                .vnodes()
                .find(|v| v.token > h)
                .or_else(|| ring.vnodes().next())
                .map(|v| *v.node);
            assert_eq!(ring.locate_key(key).ok().copied(), expected);
        }
    }

    #[test]
    fn test_closest_n_starts_at_owner() {
        let mut ring = HashRing::new(10);
        ring.add_nodes(1..=8);
        let owner = *ring.locate_key("abcdefg").unwrap();
        assert_eq!(*ring.closest_n("abcdefg", 3).unwrap()[0], owner);
        assert_eq!(*ring.closest_n_distinct("abcdefg", 3).unwrap()[0], owner);
    }

    #[test]
    fn test_custom_partitioner() {
        let mut ring = HashRing::with_partitioner(5, Xxh3Partitioner);
        ring.add_node(1u8);
        assert_eq!(ring.partitioner_name(), "Xxh3Partitioner");
        assert_eq!(ring.locate_key("k"), Ok(&1u8));
    }

    #[test]
    fn test_clear_returns_to_empty() {
        let mut ring = HashRing::new(5);
        ring.add_nodes(1..=3);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.token_count(), 0);
        assert_eq!(ring.locate_key("k"), Err(Error::EmptyRing));
    }
}
