use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::network::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ForwardingEntry<N> {
    pub destination: N,
    pub next_hop: N,
}

/// Per-router forwarding tables for a whole topology.
///
/// Routers appear in graph node order and each router's entries follow the
/// same order. Destinations the router cannot reach have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingTable<N: NodeId> {
    tables: Vec<(N, Vec<ForwardingEntry<N>>)>,
    index: HashMap<N, usize>,
}

impl<N: NodeId> ForwardingTable<N> {
    pub(crate) fn from_tables(tables: Vec<(N, Vec<ForwardingEntry<N>>)>) -> Self {
        let index = tables
            .iter()
            .enumerate()
            .map(|(at, (node, _))| (node.clone(), at))
            .collect();

        Self { tables, index }
    }

    /// Forwarding entries of `node`, or `None` if the router is unknown.
    pub fn entries(&self, node: &N) -> Option<&[ForwardingEntry<N>]> {
        let at = *self.index.get(node)?;
        Some(&self.tables[at].1)
    }

    pub fn next_hop(&self, node: &N, destination: &N) -> Option<&N> {
        self.entries(node)?
            .iter()
            .find(|entry| entry.destination == *destination)
            .map(|entry| &entry.next_hop)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, &[ForwardingEntry<N>])> {
        self.tables
            .iter()
            .map(|(node, entries)| (node, entries.as_slice()))
    }

    /// Number of routers in the table.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of entries across all routers.
    pub fn route_count(&self) -> usize {
        self.tables.iter().map(|(_, entries)| entries.len()).sum()
    }
}

impl<N: NodeId + Serialize> Serialize for ForwardingTable<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (node, entries) in &self.tables {
            map.serialize_entry(node, entries)?;
        }
        map.end()
    }
}

impl<N: NodeId + fmt::Display> fmt::Display for ForwardingTable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, entries) in &self.tables {
            write!(f, "Node {}: [", node)?;
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "({}, {})", entry.destination, entry.next_hop)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
