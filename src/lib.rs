//! Link-state routing: every router computes shortest paths over a shared
//! view of the topology and keeps the first hop towards each destination.
//!
//! ```
//! use link_state_routing::{build_forwarding_table, Graph};
//!
//! let mut graph = Graph::directed();
//! graph.add_edge("A", "B", 1);
//! graph.add_edge("B", "C", 2);
//! graph.add_edge("A", "C", 5);
//!
//! let table = build_forwarding_table(&graph).unwrap();
//! assert_eq!(table.next_hop(&"A", &"C"), Some(&"B"));
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod network;
pub mod routing;

pub use algorithms::{shortest_paths, Route, ShortestPaths};
pub use config::RoutingConfig;
pub use error::{Result, RoutingError};
pub use network::{Adjacency, Cost, Graph, GraphMode, Link, NodeId, Topology};
pub use routing::{
    build_forwarding_table, build_forwarding_table_parallel, forwarding_entries, ForwardingEntry,
    ForwardingTable,
};

/// Router identifier used by topology files and the command line.
pub type RouterId = String;
