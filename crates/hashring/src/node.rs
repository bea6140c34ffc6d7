//! Node identity for the consistent hash ring.
//!
//! Every value placed on the ring must convert to a stable identity
//! string. The ring hashes that string to find the node's registry slot
//! and derives the virtual-node keys from it, so two distinct nodes must
//! never share an identity.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::rc::Rc;
use std::sync::Arc;

/// Stable string identity of a ring node.
///
/// The mapping must be deterministic (same value, same string, for the
/// lifetime of the ring) and injective (distinct nodes, distinct strings).
/// Removal recomputes every virtual key from this string, so an identity
/// that changes while the node is on the ring leaves orphaned entries.
///
/// Scalars use their natural `Display` form; composite types implement
/// it explicitly:
///
/// ```rust
/// use hashring::NodeIdentity;
///
/// struct Shard {
///     cluster: String,
///     index: u32,
/// }
///
/// impl NodeIdentity for Shard {
///     fn identity(&self) -> String {
///         format!("{}/{}", self.cluster, self.index)
///     }
/// }
/// ```
pub trait NodeIdentity {
    /// Returns the canonical identity string of this node.
    fn identity(&self) -> String;
}

macro_rules! identity_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NodeIdentity for $ty {
                #[inline]
                fn identity(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

identity_via_display!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, str, String,
    IpAddr, SocketAddr,
);

impl<T: NodeIdentity + ?Sized> NodeIdentity for &T {
    fn identity(&self) -> String {
        (**self).identity()
    }
}

impl<T: NodeIdentity + ?Sized> NodeIdentity for Box<T> {
    fn identity(&self) -> String {
        (**self).identity()
    }
}

impl<T: NodeIdentity + ?Sized> NodeIdentity for Arc<T> {
    fn identity(&self) -> String {
        (**self).identity()
    }
}

impl<T: NodeIdentity + ?Sized> NodeIdentity for Rc<T> {
    fn identity(&self) -> String {
        (**self).identity()
    }
}

/// A named endpoint participating in the ring.
///
/// Identity is the name alone: re-registering a node under the same name
/// with a new address is treated as the same node. Keep this struct small
/// and cheap to clone, the ring stores one copy per virtual position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    /// Unique name, used as the ring identity.
    pub name: String,
    /// Address requests for this node should be routed to.
    pub address: String,
    /// Optional data center label.
    pub datacenter: Option<String>,
}

impl Node {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            datacenter: None,
        }
    }

    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }
}

impl NodeIdentity for Node {
    fn identity(&self) -> String {
        self.name.clone()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.address)
    }
}
