//! Consistent hash ring implementation.
//!
//! The ring manages virtual positions and provides successor lookups for
//! finding the nodes responsible for keys.

pub mod builder;
#[allow(clippy::module_inception)]
pub mod ring;

pub use builder::RingBuilder;
pub use ring::HashRing;
