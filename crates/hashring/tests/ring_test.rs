//! Tests for the hash ring public API.
//!
//! # Test Strategy
//!
//! 1. **Basic functionality**: Empty ring, add/lookup, remove
//! 2. **Multiple nodes**: Enumeration, determinism, remapping
//! 3. **Closest N**: Bounds, ring-slot walk, distinct walk
//! 4. **Edge cases**: Clamping, single node, composite nodes

use std::collections::HashSet;

use hashring::node::Node;
use hashring::{Error, HashRing, NodeIdentity, RingBuilder, RingConfig, MIN_REPLICAS};

fn ring_of(n: i32) -> HashRing<i32> {
    let mut ring = HashRing::new(10);
    for id in 1..=n {
        ring.add_node(id);
    }
    ring
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_ring() {
    let ring: HashRing<i32> = HashRing::new(10);
    assert_eq!(ring.size(), 0);
    assert!(ring.is_empty());
    assert!(ring.nodes().is_empty());
    assert_eq!(ring.locate_key("key1"), Err(Error::EmptyRing));
    assert_eq!(ring.locate_key(""), Err(Error::EmptyRing));
}

#[test]
fn test_add_node_and_lookup() {
    let mut ring = HashRing::new(10);
    assert!(ring.add_node(1));

    assert_eq!(ring.size(), 1);
    assert!(ring.contains_node(&1));
    assert!(!ring.contains_node(&2));
    assert_eq!(ring.locate_key("test-key"), Ok(&1));
}

#[test]
fn test_idempotent_add() {
    let mut ring = HashRing::new(10);
    assert!(ring.add_node(1));
    assert!(!ring.add_node(1), "second add should be a no-op");

    assert_eq!(ring.size(), 1);
    assert_eq!(ring.token_count(), 10);
    assert!(ring.contains_node(&1));
}

#[test]
fn test_remove_node() {
    let mut ring = ring_of(2);

    assert!(ring.remove_node(&1));
    assert!(!ring.contains_node(&1));
    assert_eq!(ring.size(), 1);
    assert_eq!(ring.token_count(), 10);
    assert_eq!(ring.locate_key("some-key"), Ok(&2));
}

#[test]
fn test_remove_absent_node() {
    let mut ring = ring_of(3);
    let before = ring.nodes().into_iter().copied().collect::<Vec<_>>();

    assert!(!ring.remove_node(&999));
    assert_eq!(ring.size(), 3);
    assert_eq!(ring.token_count(), 30);
    assert_eq!(ring.nodes().into_iter().copied().collect::<Vec<_>>(), before);
}

#[test]
fn test_add_remove_add() {
    let mut ring = HashRing::new(10);
    ring.add_node("node1");
    let owner = *ring.locate_key("key").unwrap();

    assert!(ring.remove_node(&"node1"));
    assert!(ring.is_empty());
    assert_eq!(ring.locate_key("key"), Err(Error::EmptyRing));

    ring.add_node("node1");
    assert_eq!(ring.locate_key("key"), Ok(&owner));
}

// ============================================================================
// Multiple Nodes Tests
// ============================================================================

#[test]
fn test_get_all_nodes() {
    let ring = ring_of(8);
    let mut all: Vec<i32> = ring.nodes().into_iter().copied().collect();
    assert_eq!(all.len(), 8);
    all.sort();
    assert_eq!(all, (1..=8).collect::<Vec<_>>());
}

#[test]
fn test_all_nodes_ordered_by_identity_hash() {
    let ring = ring_of(8);
    let tokens: Vec<_> = ring
        .nodes()
        .into_iter()
        .map(|n| ring.key_token(&n.identity()))
        .collect();
    let mut sorted = tokens.clone();
    sorted.sort();
    assert_eq!(tokens, sorted);
}

#[test]
fn test_consistent_lookup() {
    let ring = ring_of(5);
    let first = ring.locate_key("consistent-key").unwrap();
    for _ in 0..10 {
        assert_eq!(ring.locate_key("consistent-key").unwrap(), first);
    }
}

#[test]
fn test_single_node_owns_everything() {
    let mut ring = HashRing::new(10);
    ring.add_node(42);
    for key in ["key1", "key2", "", "very-long-key-name", "abcdefg"] {
        assert_eq!(ring.locate_key(key), Ok(&42));
    }
}

#[test]
fn test_removing_owner_remaps_key() {
    let mut ring = ring_of(4);
    for key in ["alpha", "beta", "gamma", "delta"] {
        let mut ring = ring.clone();
        let owner = *ring.locate_key(key).unwrap();
        ring.remove_node(&owner);
        let next = *ring.locate_key(key).unwrap();
        assert_ne!(owner, next);
    }

    // Removing some other node leaves keys it did not own in place.
    let owner = *ring.locate_key("alpha").unwrap();
    let bystander = (1..=4).find(|id| *id != owner).unwrap();
    let unaffected: Vec<String> = (0..200)
        .map(|i| format!("k{}", i))
        .filter(|k| *ring.locate_key(k).unwrap() != bystander)
        .collect();
    let before: Vec<i32> = unaffected.iter().map(|k| *ring.locate_key(k).unwrap()).collect();
    ring.remove_node(&bystander);
    let after: Vec<i32> = unaffected.iter().map(|k| *ring.locate_key(k).unwrap()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_integration_scenario() {
    let mut ring = ring_of(8);
    assert_eq!(ring.size(), 8);

    let original = *ring.locate_key("abcdefg").unwrap();
    assert!((1..=8).contains(&original));
    assert_eq!(ring.closest_n("abcdefg", 2).unwrap().len(), 2);

    for id in 1..=6 {
        assert!(ring.remove_node(&id));
    }
    assert_eq!(ring.size(), 2);
    assert_eq!(ring.nodes().len(), 2);

    let now = *ring.locate_key("abcdefg").unwrap();
    assert!(now == 7 || now == 8);
    if original <= 6 {
        assert_ne!(original, now);
    } else {
        assert_eq!(original, now, "surviving owner keeps its keys");
    }
    assert_eq!(ring.closest_n("abcdefg", 2).unwrap().len(), 2);
}

// ============================================================================
// Closest N Tests
// ============================================================================

#[test]
fn test_closest_n_bounds() {
    let ring = ring_of(3);
    assert!(matches!(
        ring.closest_n("k", -1),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        ring.closest_n("k", 4),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(ring.closest_n("k", 0), Ok(vec![]));
    assert_eq!(ring.closest_n("k", 3).unwrap().len(), 3);

    assert!(matches!(
        ring.closest_n_distinct("k", -5),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        ring.closest_n_distinct("k", 4),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_closest_n_empty_ring() {
    let ring: HashRing<i32> = HashRing::new(10);
    assert_eq!(ring.closest_n("k", 1), Err(Error::EmptyRing));
    assert_eq!(ring.closest_n("k", 0), Ok(vec![]));
    assert!(matches!(
        ring.closest_n("k", -1),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(ring.closest_n_distinct("k", 2), Err(Error::EmptyRing));
}

#[test]
fn test_closest_n_walks_ring_slots() {
    let ring = ring_of(8);
    let key = "abcdefg";
    let h = ring.key_token(key);

    // Owners of the n positions after the key, wrapping.
    let slots: Vec<i32> = ring
        .vnodes()
        .filter(|v| v.token > h)
        .chain(ring.vnodes().filter(|v| v.token <= h))
        .map(|v| *v.node)
        .take(8)
        .collect();

    for n in 1..=8 {
        let got: Vec<i32> = ring.closest_n(key, n).unwrap().into_iter().copied().collect();
        assert_eq!(got, &slots[..n as usize]);
    }
}

#[test]
fn test_closest_n_may_repeat_single_node() {
    // With one node every slot belongs to it.
    let mut ring = HashRing::new(10);
    ring.add_node(1);
    ring.add_node(2);
    ring.remove_node(&2);
    assert_eq!(ring.closest_n("k", 1), Ok(vec![&1]));

    // Two nodes, ten slots each: the slot walk repeats whenever two
    // consecutive positions share an owner, the distinct walk never does.
    let ring = ring_of(2);
    let repeats = (0..100)
        .map(|i| format!("key-{}", i))
        .filter(|k| {
            let slots = ring.closest_n(k, 2).unwrap();
            slots[0] == slots[1]
        })
        .count();
    assert!(repeats > 0, "some keys should land on same-owner neighbours");

    for i in 0..100 {
        let distinct = ring.closest_n_distinct(&format!("key-{}", i), 2).unwrap();
        assert_ne!(distinct[0], distinct[1]);
    }
}

#[test]
fn test_closest_n_distinct_returns_every_node() {
    let ring = ring_of(8);
    let all: HashSet<i32> = ring
        .closest_n_distinct("abcdefg", 8)
        .unwrap()
        .into_iter()
        .copied()
        .collect();
    assert_eq!(all, (1..=8).collect());
}

// ============================================================================
// Configuration & Edge Cases
// ============================================================================

#[test]
fn test_minimum_clamp() {
    let ring: HashRing<i32> = HashRing::new(-24);
    assert_eq!(ring.replication_factor(), 5);
    assert_eq!(ring.replication_factor(), MIN_REPLICAS);

    let ring: HashRing<i32> = HashRing::new(10);
    assert_eq!(ring.replication_factor(), 10);
}

#[test]
fn test_ring_from_config() {
    let config: RingConfig = RingConfig::new(64);
    let mut ring = HashRing::from_config(&config);
    ring.add_node(Node::new("cache-1", "10.0.0.1:6379"));
    assert_eq!(ring.token_count(), 64);
    assert_eq!(ring.partitioner_name(), "SipPartitioner");
}

#[test]
fn test_composite_nodes() {
    let mut ring = RingBuilder::new()
        .add_node(Node::new("cache-1", "10.0.0.1:6379"))
        .add_node(Node::new("cache-2", "10.0.0.2:6379"))
        .build();

    // Same name, different address: same identity.
    assert!(!ring.add_node(Node::new("cache-1", "10.9.9.9:6379")));
    assert_eq!(ring.size(), 2);
    assert!(ring.contains_node(&Node::new("cache-2", "")));

    let owner = ring.locate_key("user:1").unwrap();
    assert!(owner.name == "cache-1" || owner.name == "cache-2");
    assert!(ring.remove_node(&Node::new("cache-2", "anything")));
    assert_eq!(ring.locate_key("user:1").unwrap().name, "cache-1");
}

#[test]
fn test_error_messages() {
    let ring = ring_of(2);
    let err = ring.closest_n("k", 3).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid argument: requested 3 nodes but the ring holds 2"
    );
    assert_eq!(Error::EmptyRing.to_string(), "hash ring is empty");
}
