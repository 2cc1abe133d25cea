use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::network::graph::Cost;
use crate::RouterId;

/// Topology description as supplied by an operator or a config file:
/// each router with its ordered list of outgoing links.
///
/// Serialized as a plain list of adjacencies; the lookup index is rebuilt on
/// load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Adjacency>", into = "Vec<Adjacency>")]
pub struct Topology {
    adjacencies: Vec<Adjacency>,
    index: HashMap<RouterId, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacency {
    pub node: RouterId,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub to: RouterId,
    pub cost: Cost,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure `node` has an adjacency entry, even if it never gets a link.
    pub fn add_node(&mut self, node: &str) {
        self.entry(node);
    }

    /// Appends `src -> dst` to the links of `src`.
    pub fn insert_link(&mut self, src: &str, dst: &str, cost: Cost) {
        self.entry(src).links.push(Link {
            to: dst.to_string(),
            cost,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Adjacency> {
        self.adjacencies.iter()
    }

    pub fn link_count(&self) -> usize {
        self.adjacencies.iter().map(|a| a.links.len()).sum()
    }

    /// Distinct routers mentioned anywhere, as source or destination.
    pub fn node_count(&self) -> usize {
        let mut seen = HashSet::new();
        for adjacency in &self.adjacencies {
            seen.insert(adjacency.node.as_str());
            seen.extend(adjacency.links.iter().map(|l| l.to.as_str()));
        }
        seen.len()
    }

    /// Parses the plain edge-list format, one `<source> <destination> <weight>`
    /// per line.
    ///
    /// Blank lines and `#` comments are ignored. The first content line may be
    /// a `<node count> <edge count>` header; when present both counts are
    /// checked against the edges that follow.
    pub fn parse_edge_list(text: &str) -> Result<Self> {
        let mut topology = Self::new();
        let mut header: Option<(usize, usize, usize)> = None;
        let mut first = true;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            let fields: Vec<&str> = content.split_whitespace().collect();
            match fields.as_slice() {
                [nodes, edges] if first => match (nodes.parse::<usize>(), edges.parse::<usize>()) {
                    (Ok(nodes), Ok(edges)) => header = Some((line, nodes, edges)),
                    _ => return Err(shape_error(line, fields.len())),
                },
                [src, dst, weight] => {
                    let cost = weight.parse::<Cost>().map_err(|_| {
                        RoutingError::invalid_topology(
                            line,
                            format!("invalid weight '{}' for link {} -> {}", weight, src, dst),
                        )
                    })?;
                    topology.insert_link(src, dst, cost);
                }
                _ => return Err(shape_error(line, fields.len())),
            }
            first = false;
        }

        if let Some((line, nodes, edges)) = header {
            if topology.link_count() != edges {
                return Err(RoutingError::invalid_topology(
                    line,
                    format!(
                        "header declares {} edge(s) but {} were given",
                        edges,
                        topology.link_count()
                    ),
                ));
            }
            if topology.node_count() > nodes {
                return Err(RoutingError::invalid_topology(
                    line,
                    format!(
                        "header declares {} node(s) but links mention {}",
                        nodes,
                        topology.node_count()
                    ),
                ));
            }
        }

        Ok(topology)
    }

    fn entry(&mut self, node: &str) -> &mut Adjacency {
        let at = match self.index.get(node) {
            Some(&at) => at,
            None => {
                let at = self.adjacencies.len();
                self.adjacencies.push(Adjacency {
                    node: node.to_string(),
                    links: Vec::new(),
                });
                self.index.insert(node.to_string(), at);
                at
            }
        };
        &mut self.adjacencies[at]
    }
}

impl FromStr for Topology {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_edge_list(s)
    }
}

impl From<Vec<Adjacency>> for Topology {
    fn from(adjacencies: Vec<Adjacency>) -> Self {
        let mut topology = Self::new();
        for adjacency in adjacencies {
            topology.entry(&adjacency.node).links.extend(adjacency.links);
        }
        topology
    }
}

impl From<Topology> for Vec<Adjacency> {
    fn from(topology: Topology) -> Self {
        topology.adjacencies
    }
}

fn shape_error(line: usize, fields: usize) -> RoutingError {
    RoutingError::invalid_topology(
        line,
        format!(
            "expected '<source> <destination> <weight>' or a leading '<nodes> <edges>' header, got {} field(s)",
            fields
        ),
    )
}
