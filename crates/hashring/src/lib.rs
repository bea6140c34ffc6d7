//! Consistent hash ring.
//!
//! This crate maps string keys onto a changing set of nodes so that each
//! key has exactly one owner and membership changes only move the keys
//! of the node that joined or left:
//! - Node identity and hashing (`node`, `partitioner`, `token`)
//! - Virtual node placement (`vnode`)
//! - The ring itself and its builder (`ring`)
//! - A reader-writer locked wrapper for shared use (`sync`)

pub mod config;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod sync;
pub mod token;
pub mod vnode;

pub use config::{RingConfig, MIN_REPLICAS, REPLICA_SALT};
pub use error::{Error, Result};
pub use node::{Node, NodeIdentity};
pub use partitioner::{Partitioner, PartitionerKind};
pub use ring::{HashRing, RingBuilder};
pub use sync::SyncHashRing;
pub use token::Token;
pub use vnode::VirtualNode;
