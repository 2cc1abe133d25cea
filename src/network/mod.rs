pub mod graph;
pub mod topology;

pub use graph::{Cost, Graph, GraphMode, NodeId};
pub use topology::{Adjacency, Link, Topology};
