use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::error::{Result, RoutingError};
use crate::network::{Cost, Graph, NodeId};

/// Best known route from the source to one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<'g, N> {
    pub destination: &'g N,
    pub cost: Cost,
    /// Neighbor of the source that the route leaves through.
    pub first_hop: &'g N,
}

/// Output of one Dijkstra run from a single source.
///
/// Destinations the source cannot reach are simply absent: `distance`,
/// `first_hop` and `path` return `None` for them and `iter` skips them.
#[derive(Debug, Clone)]
pub struct ShortestPaths<'g, N> {
    graph: &'g Graph<N>,
    source: usize,
    distance: Vec<Option<Cost>>,
    first_hop: Vec<Option<usize>>,
    predecessor: Vec<Option<usize>>,
}

#[derive(Debug, PartialEq, Eq)]
struct State {
    cost: Cost,
    node: usize,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; equal costs pop in node order
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Runs Dijkstra from `source` over `graph`.
///
/// The first hop is propagated along each relaxation rather than recovered
/// from the predecessor chain: a neighbor of the source gets itself as first
/// hop, every other node inherits the first hop of the node it was reached
/// from. Relaxation uses a strict `<`, so among equal-cost paths the one
/// discovered first is kept. Paths whose total cost overflows [`Cost`] are
/// dropped; a destination reachable only through such paths is unreachable.
pub fn shortest_paths<'g, N: NodeId>(graph: &'g Graph<N>, source: &N) -> Result<ShortestPaths<'g, N>> {
    let source = graph
        .index_of(source)
        .ok_or_else(|| RoutingError::node_not_found(source))?;

    let count = graph.node_count();
    let mut distance: Vec<Option<Cost>> = vec![None; count];
    let mut first_hop: Vec<Option<usize>> = vec![None; count];
    let mut predecessor: Vec<Option<usize>> = vec![None; count];
    let mut visited = vec![false; count];
    let mut heap = BinaryHeap::new();

    distance[source] = Some(0);
    heap.push(State { cost: 0, node: source });

    let mut relaxations = 0usize;
    while let Some(State { cost, node }) = heap.pop() {
        // Stale entry left behind by an earlier relaxation
        if visited[node] {
            continue;
        }
        visited[node] = true;

        for &(neighbor, link_cost) in graph.links_at(node) {
            // A path whose total does not fit in `Cost` is not a route
            let Some(candidate) = cost.checked_add(link_cost) else {
                continue;
            };

            if distance[neighbor].is_none_or(|best| candidate < best) {
                distance[neighbor] = Some(candidate);
                first_hop[neighbor] = if node == source {
                    Some(neighbor)
                } else {
                    first_hop[node]
                };
                predecessor[neighbor] = Some(node);
                relaxations += 1;

                heap.push(State {
                    cost: candidate,
                    node: neighbor,
                });
            }
        }
    }

    debug!(
        "Dijkstra from {:?}: {} of {} nodes reachable, {} relaxations",
        graph.node_at(source),
        visited.iter().filter(|&&v| v).count(),
        count,
        relaxations
    );

    Ok(ShortestPaths {
        graph,
        source,
        distance,
        first_hop,
        predecessor,
    })
}

impl<'g, N: NodeId> ShortestPaths<'g, N> {
    pub fn source(&self) -> &'g N {
        self.graph.node_at(self.source)
    }

    /// Total cost to `destination`; `Some(0)` for the source itself.
    pub fn distance(&self, destination: &N) -> Option<Cost> {
        self.distance[self.graph.index_of(destination)?]
    }

    /// First router after the source on the way to `destination`.
    pub fn first_hop(&self, destination: &N) -> Option<&'g N> {
        let hop = self.first_hop[self.graph.index_of(destination)?]?;
        Some(self.graph.node_at(hop))
    }

    pub fn route(&self, destination: &N) -> Option<Route<'g, N>> {
        self.route_at(self.graph.index_of(destination)?)
    }

    /// Full router sequence from the source to `destination`, both included.
    pub fn path(&self, destination: &N) -> Option<Vec<N>> {
        let mut current = self.graph.index_of(destination)?;
        self.distance[current]?;

        let mut path = vec![self.graph.node_at(current).clone()];
        while let Some(previous) = self.predecessor[current] {
            path.push(self.graph.node_at(previous).clone());
            current = previous;
        }

        path.reverse();
        Some(path)
    }

    /// Routes to every reachable destination other than the source, in graph
    /// node order.
    pub fn iter(&self) -> impl Iterator<Item = Route<'g, N>> + '_ {
        (0..self.distance.len()).filter_map(move |at| self.route_at(at))
    }

    pub fn len(&self) -> usize {
        self.first_hop.iter().filter(|hop| hop.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn route_at(&self, at: usize) -> Option<Route<'g, N>> {
        let hop = self.first_hop[at]?;
        Some(Route {
            destination: self.graph.node_at(at),
            cost: self.distance[at]?,
            first_hop: self.graph.node_at(hop),
        })
    }
}

impl<N: NodeId> PartialEq for ShortestPaths<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
            && self.distance == other.distance
            && self.first_hop == other.first_hop
            && self.predecessor == other.predecessor
    }
}
