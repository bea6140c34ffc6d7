//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each real node having a single position on the ring, each
//! node has `replication_factor` positions (virtual nodes). This gives:
//!
//! 1. **Better Load Distribution**: more positions smooth the arcs each node owns
//! 2. **Gradual Rebalancing**: when a node joins or leaves only its arcs move
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(r) ring entries per node, r = replication factor
//! - **Lookup**: O(log(n * r)) over all virtual positions
//!
//! Each virtual position is the hash of `"{identity} - RepN: {index + 111}"`.
//! The string is rebuilt identically on removal, so it must never change
//! for a given `(identity, index)` pair.

use crate::config::{REPLICA_SALT, REPLICA_SEPARATOR};
use crate::partitioner::Partitioner;
use crate::token::Token;
use std::fmt;

/// Builds the hash input for replica `replica` of the node with `identity`.
pub fn replica_key(identity: &str, replica: usize) -> String {
    format!("{}{}{}", identity, REPLICA_SEPARATOR, replica + REPLICA_SALT)
}

/// Tokens of all `replicas` virtual positions of a node, in replica order.
pub(crate) fn replica_tokens<'a, P: Partitioner>(
    partitioner: &'a P,
    identity: &'a str,
    replicas: usize,
) -> impl Iterator<Item = Token> + 'a {
    (0..replicas).map(move |i| partitioner.partition_str(&replica_key(identity, i)))
}

/// A virtual node on the hash ring.
///
/// Borrowed view of one ring entry: the position and the real node that
/// owns it. Produced by [`HashRing::vnodes`](crate::HashRing::vnodes) for
/// inspection and debugging.
#[derive(Debug, PartialEq, Eq)]
pub struct VirtualNode<'a, T> {
    /// Token position on the ring.
    pub token: Token,
    /// The real node that owns this position.
    pub node: &'a T,
}

impl<'a, T> Clone for VirtualNode<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for VirtualNode<'a, T> {}

impl<'a, T> VirtualNode<'a, T> {
    #[inline]
    pub fn new(token: Token, node: &'a T) -> Self {
        Self { token, node }
    }

    /// Clockwise distance to another virtual node.
    ///
    /// Summed over consecutive entries this gives the arc each node owns,
    /// which is handy for load analysis.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> u64 {
        self.token.distance_to(&other.token)
    }
}

impl<T: fmt::Display> fmt::Display for VirtualNode<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(token={}, node={})", self.token, self.node)
    }
}
