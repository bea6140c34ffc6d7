//! Runtime-selectable partitioner.

use crate::partitioner::sip::SipPartitioner;
use crate::partitioner::traits::Partitioner;
use crate::partitioner::xxh3::Xxh3Partitioner;
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Partitioner chosen from configuration.
///
/// Serialized as `"sip"` or `"xxh3"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionerKind {
    #[default]
    Sip,
    Xxh3,
}

impl Partitioner for PartitionerKind {
    fn partition(&self, key: &[u8]) -> Token {
        match self {
            PartitionerKind::Sip => SipPartitioner.partition(key),
            PartitionerKind::Xxh3 => Xxh3Partitioner.partition(key),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            PartitionerKind::Sip => SipPartitioner.name(),
            PartitionerKind::Xxh3 => Xxh3Partitioner.name(),
        }
    }
}

impl fmt::Display for PartitionerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionerKind::Sip => f.write_str("sip"),
            PartitionerKind::Xxh3 => f.write_str("xxh3"),
        }
    }
}

impl FromStr for PartitionerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sip" | "siphash" => Ok(PartitionerKind::Sip),
            "xxh3" | "xxhash" => Ok(PartitionerKind::Xxh3),
            other => Err(format!("unknown partitioner '{}', expected sip or xxh3", other)),
        }
    }
}
