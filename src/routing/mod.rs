pub mod forwarding_table;

pub use forwarding_table::{ForwardingEntry, ForwardingTable};

use log::info;
use rayon::prelude::*;

use crate::algorithms::{shortest_paths, ShortestPaths};
use crate::error::Result;
use crate::network::{Graph, NodeId};

/// Runs Dijkstra once per router and keeps the first hop towards every
/// reachable destination.
pub fn build_forwarding_table<N: NodeId>(graph: &Graph<N>) -> Result<ForwardingTable<N>> {
    let tables = graph
        .nodes()
        .iter()
        .map(|source| forwarding_entries(graph, source))
        .collect::<Result<Vec<_>>>()?;

    Ok(finish(graph, tables))
}

/// Same as [`build_forwarding_table`], with the per-router runs spread over
/// the rayon thread pool. Each run only reads the shared graph; the table is
/// assembled once every run has returned, and the first failing run is
/// reported.
pub fn build_forwarding_table_parallel<N>(graph: &Graph<N>) -> Result<ForwardingTable<N>>
where
    N: NodeId + Send + Sync,
{
    let tables = graph
        .nodes()
        .par_iter()
        .map(|source| forwarding_entries(graph, source))
        .collect::<Result<Vec<_>>>()?;

    Ok(finish(graph, tables))
}

/// Forwarding entries of a single router.
pub fn forwarding_entries<N: NodeId>(
    graph: &Graph<N>,
    source: &N,
) -> Result<(N, Vec<ForwardingEntry<N>>)> {
    let paths = shortest_paths(graph, source)?;
    Ok((source.clone(), entries_from_paths(&paths)))
}

fn entries_from_paths<N: NodeId>(paths: &ShortestPaths<'_, N>) -> Vec<ForwardingEntry<N>> {
    paths
        .iter()
        .map(|route| ForwardingEntry {
            destination: route.destination.clone(),
            next_hop: route.first_hop.clone(),
        })
        .collect()
}

fn finish<N: NodeId>(graph: &Graph<N>, tables: Vec<(N, Vec<ForwardingEntry<N>>)>) -> ForwardingTable<N> {
    let table = ForwardingTable::from_tables(tables);
    info!(
        "Forwarding table computed for {} routers ({} links): {} routes",
        graph.node_count(),
        graph.edge_count(),
        table.route_count()
    );
    table
}
