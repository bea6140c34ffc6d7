//! Core partitioner trait definitions.

use crate::token::Token;

/// A partitioner converts keys into tokens for placement on the hash ring.
///
/// Partitioners are stateless and thread-safe, allowing concurrent
/// token generation without synchronization overhead. The same input
/// must always produce the same token: node removal recomputes every
/// virtual position from scratch and relies on landing on the entries
/// that were inserted.
pub trait Partitioner: Send + Sync + 'static {
    /// Converts a key into a token.
    fn partition(&self, key: &[u8]) -> Token;

    /// Convenience wrapper for string keys.
    #[inline]
    fn partition_str(&self, key: &str) -> Token {
        self.partition(key.as_bytes())
    }

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
