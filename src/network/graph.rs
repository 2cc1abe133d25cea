use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::network::topology::Topology;
use crate::RouterId;

/// Link metric. Unsigned, so negative weights cannot be expressed.
pub type Cost = u32;

/// Anything usable as a router identifier in a [`Graph`].
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeId for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphMode {
    /// Links are one-way.
    #[default]
    Directed,
    /// Every link is mirrored with the same cost.
    Undirected,
}

/// Weighted link-state database: routers plus their outgoing links.
///
/// Routers are kept in insertion order and addressed internally by that
/// position, which is what makes every computation over the graph
/// deterministic. Adjacency lists also keep insertion order; re-adding an
/// existing `src -> dst` link overwrites its cost in place.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    mode: GraphMode,
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    adjacency: Vec<Vec<(usize, Cost)>>,
}

impl<N: NodeId> Graph<N> {
    pub fn new(mode: GraphMode) -> Self {
        Self {
            mode,
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(GraphMode::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(GraphMode::Undirected)
    }

    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    /// Registers a router with no links. No-op if it is already known.
    pub fn add_node(&mut self, node: N) {
        self.intern(node);
    }

    /// Records `src -> dst` with the given cost, plus `dst -> src` in undirected mode.
    pub fn add_edge(&mut self, src: N, dst: N, cost: Cost) {
        let from = self.intern(src);
        let to = self.intern(dst);

        self.insert_link(from, to, cost);
        if self.mode == GraphMode::Undirected {
            self.insert_link(to, from, cost);
        }
    }

    /// All routers, in the order they were first seen.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored one-way links (an undirected link counts twice).
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Outgoing links of `node` as `(neighbor, cost)` pairs.
    pub fn neighbors<'a>(&'a self, node: &N) -> Result<impl Iterator<Item = (&'a N, Cost)> + use<'a, N>> {
        let at = self
            .index_of(node)
            .ok_or_else(|| RoutingError::node_not_found(node))?;

        Ok(self.adjacency[at]
            .iter()
            .map(|&(to, cost)| (&self.nodes[to], cost)))
    }

    pub fn edge_weight(&self, src: &N, dst: &N) -> Option<Cost> {
        let from = self.index_of(src)?;
        let to = self.index_of(dst)?;

        self.adjacency[from]
            .iter()
            .find(|(neighbor, _)| *neighbor == to)
            .map(|&(_, cost)| cost)
    }

    pub(crate) fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub(crate) fn node_at(&self, at: usize) -> &N {
        &self.nodes[at]
    }

    pub(crate) fn links_at(&self, at: usize) -> &[(usize, Cost)] {
        &self.adjacency[at]
    }

    fn intern(&mut self, node: N) -> usize {
        if let Some(&at) = self.index.get(&node) {
            return at;
        }

        let at = self.nodes.len();
        self.index.insert(node.clone(), at);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        at
    }

    fn insert_link(&mut self, from: usize, to: usize, cost: Cost) {
        match self.adjacency[from].iter_mut().find(|(neighbor, _)| *neighbor == to) {
            Some(link) => {
                if link.1 != cost {
                    warn!(
                        "Overwriting link {:?} -> {:?} (old cost: {}, new cost: {})",
                        self.nodes[from], self.nodes[to], link.1, cost
                    );
                }
                link.1 = cost;
            }
            None => self.adjacency[from].push((to, cost)),
        }
    }
}

impl Graph<RouterId> {
    /// Builds the link-state database from a topology description.
    pub fn from_topology(topology: &Topology, mode: GraphMode) -> Self {
        let mut graph = Self::new(mode);

        for adjacency in topology.iter() {
            graph.add_node(adjacency.node.clone());
            for link in &adjacency.links {
                graph.add_edge(adjacency.node.clone(), link.to.clone(), link.cost);
            }
        }

        debug!(
            "Built {:?} graph: {} nodes, {} links",
            mode,
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}
