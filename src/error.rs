//! Error types for graph construction and solver configuration.
//!
//! Only construction can fail. Once a [`Graph`](crate::graph::Graph) and a
//! solver exist, every `advance` call is total.

use thiserror::Error;

/// Errors reported synchronously to whoever builds a graph, scene or solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("graph must contain at least one node")]
    EmptyGraph,

    #[error("node index {index} out of range for graph of {node_count} nodes")]
    NodeOutOfRange { index: usize, node_count: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("metadata count {metadata} does not match node count {nodes}")]
    MetadataMismatch { metadata: usize, nodes: usize },

    #[error("graph of {node_count} nodes has more node pairs than fit in memory")]
    GraphTooLarge { node_count: usize },
}

impl LayoutError {
    /// Creates an [`LayoutError::InvalidConfig`] from anything string-like.
    pub fn config(message: impl Into<String>) -> Self {
        LayoutError::InvalidConfig(message.into())
    }
}

/// Result alias for fallible construction.
pub type LayoutResult<T> = Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formatting() {
        assert_eq!(
            LayoutError::EmptyGraph.to_string(),
            "graph must contain at least one node"
        );

        let err = LayoutError::NodeOutOfRange {
            index: 7,
            node_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "node index 7 out of range for graph of 3 nodes"
        );

        let err = LayoutError::config("damping must lie in (0, 1)");
        assert_eq!(
            err.to_string(),
            "invalid configuration: damping must lie in (0, 1)"
        );

        let err = LayoutError::GraphTooLarge { node_count: 9 };
        assert_eq!(
            err.to_string(),
            "graph of 9 nodes has more node pairs than fit in memory"
        );
    }

    #[test]
    fn test_result_alias() {
        fn fails() -> LayoutResult<()> {
            Err(LayoutError::EmptyGraph)
        }
        assert_eq!(fails(), Err(LayoutError::EmptyGraph));
    }
}
