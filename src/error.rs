use thiserror::Error;

/// Errors raised while building a graph or computing routes over it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// A route computation or neighbor lookup named a node the graph does not hold.
    #[error("node {node} not found in topology")]
    NodeNotFound { node: String },

    /// The topology description could not be turned into a graph.
    #[error("invalid topology at line {line}: {reason}")]
    InvalidTopology { line: usize, reason: String },
}

impl RoutingError {
    pub fn node_not_found(node: &impl std::fmt::Debug) -> Self {
        RoutingError::NodeNotFound {
            node: format!("{:?}", node),
        }
    }

    pub fn invalid_topology(line: usize, reason: impl Into<String>) -> Self {
        RoutingError::InvalidTopology {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RoutingError>;
