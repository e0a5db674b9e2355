//! Graph - fixed-size undirected graph with 3D node positions.
//!
//! The node count is fixed at construction. Edges are set while the graph
//! is built and are read-only to the layout engines, which only move
//! positions.

use petgraph::EdgeType;
use petgraph::graph::IndexType;

use super::edge::{EdgeMatrix, PairIter};
use crate::error::{LayoutError, LayoutResult};
use crate::math::Vector3;

/// Node positions plus a condensed edge matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    positions: Vec<Vector3>,
    edges: EdgeMatrix,
}

impl Graph {
    /// Create a graph of `node_count` unconnected nodes at the origin.
    ///
    /// Fails for zero nodes and for counts whose pair matrix cannot be
    /// addressed on the target.
    pub fn new(node_count: usize) -> LayoutResult<Self> {
        if node_count == 0 {
            return Err(LayoutError::EmptyGraph);
        }
        let edges = EdgeMatrix::new(node_count)?;
        Ok(Self {
            positions: vec![Vector3::ZERO; node_count],
            edges,
        })
    }

    /// Build a graph from flat edge pairs `[a0, b0, a1, b1, ...]`.
    ///
    /// Self pairs are ignored and a trailing odd element is dropped.
    pub fn from_edge_pairs(node_count: usize, pairs: &[u32]) -> LayoutResult<Self> {
        let mut graph = Self::new(node_count)?;
        for pair in pairs.chunks_exact(2) {
            let (a, b) = (pair[0] as usize, pair[1] as usize);
            for index in [a, b] {
                if index >= node_count {
                    return Err(LayoutError::NodeOutOfRange { index, node_count });
                }
            }
            graph.set_edge(a, b, true);
        }
        Ok(graph)
    }

    /// Import the topology of a petgraph graph.
    ///
    /// Direction is ignored, self-loops and parallel edges collapse.
    pub fn from_petgraph<N, E, Ty, Ix>(source: &petgraph::Graph<N, E, Ty, Ix>) -> LayoutResult<Self>
    where
        Ty: EdgeType,
        Ix: IndexType,
    {
        let mut graph = Self::new(source.node_count())?;
        for edge in source.raw_edges() {
            graph.set_edge(edge.source().index(), edge.target().index(), true);
        }
        Ok(graph)
    }

    // =========================================================================
    // Topology
    // =========================================================================

    /// Number of nodes, fixed at construction.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether `i` and `j` are connected. Order-independent, false for `i == j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is not below `node_count()`.
    #[inline]
    pub fn edge(&self, i: usize, j: usize) -> bool {
        self.edges.get(i, j)
    }

    /// Connect or disconnect two nodes. `i == j` is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if either index is not below `node_count()`.
    #[inline]
    pub fn set_edge(&mut self, i: usize, j: usize, value: bool) {
        self.edges.set(i, j, value);
    }

    /// Number of connected pairs.
    pub fn edge_count(&self) -> usize {
        self.edges.count()
    }

    /// Get the condensed edge matrix.
    pub fn edge_matrix(&self) -> &EdgeMatrix {
        &self.edges
    }

    /// All unordered pairs in canonical order (`from in 1..n, to in 0..from`).
    pub fn pairs(&self) -> PairIter {
        self.edges.pairs()
    }

    /// Connected pairs `(from, to)` with `from > to`, in canonical order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs()
            .filter(move |pair| self.edges.get_condensed(pair.index))
            .map(|pair| (pair.from, pair.to))
    }

    /// Number of edges incident to `node`.
    pub fn degree(&self, node: usize) -> usize {
        (0..self.node_count())
            .filter(|&other| self.edge(node, other))
            .count()
    }

    /// Degree of every node, computed in one pass over the matrix.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.node_count()];
        for (from, to) in self.edges() {
            degrees[from] += 1;
            degrees[to] += 1;
        }
        degrees
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// # Panics
    ///
    /// Panics if `node` is not below `node_count()`.
    #[inline]
    pub fn position(&self, node: usize) -> Vector3 {
        self.positions[node]
    }

    /// # Panics
    ///
    /// Panics if `node` is not below `node_count()`.
    #[inline]
    pub fn set_position(&mut self, node: usize, position: Vector3) {
        self.positions[node] = position;
    }

    /// Get all node positions, by node index.
    pub fn positions(&self) -> &[Vector3] {
        &self.positions
    }

    /// Get all node positions for in-place updates.
    pub fn positions_mut(&mut self) -> &mut [Vector3] {
        &mut self.positions
    }

    /// Overwrite every position with those of a graph of the same size.
    ///
    /// # Panics
    ///
    /// Panics if the node counts differ.
    pub fn copy_positions_from(&mut self, other: &Graph) {
        self.positions.copy_from_slice(&other.positions);
    }

    /// Translate every node by `delta`.
    pub fn move_by(&mut self, delta: Vector3) {
        for position in &mut self.positions {
            *position += delta;
        }
    }

    /// Arithmetic mean of all node positions.
    pub fn mass_center(&self) -> Vector3 {
        let sum = self
            .positions
            .iter()
            .fold(Vector3::ZERO, |acc, &position| acc + position);
        sum / self.node_count() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path4() -> Graph {
        let mut graph = Graph::new(4).unwrap();
        graph.set_edge(1, 0, true);
        graph.set_edge(2, 1, true);
        graph.set_edge(3, 2, true);
        graph
    }

    #[test]
    fn test_empty_graph_rejected() {
        assert_eq!(Graph::new(0), Err(LayoutError::EmptyGraph));
        assert_eq!(Graph::new(1).unwrap().node_count(), 1);
    }

    #[test]
    fn test_oversized_graph_rejected() {
        assert_eq!(
            Graph::new(usize::MAX),
            Err(LayoutError::GraphTooLarge {
                node_count: usize::MAX
            })
        );
        assert!(matches!(
            Graph::from_edge_pairs(usize::MAX, &[0, 1]),
            Err(LayoutError::GraphTooLarge { .. })
        ));
    }

    #[test]
    fn test_path_edges() {
        let graph = path4();

        assert!(graph.edge(0, 1));
        assert!(graph.edge(1, 2));
        assert!(graph.edge(2, 3));
        assert!(!graph.edge(0, 2));
        assert!(!graph.edge(0, 3));
        assert!(!graph.edge(1, 3));
        assert_eq!(graph.edge_count(), 3);

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn test_edge_symmetry_and_no_self_loops() {
        let mut graph = Graph::new(5).unwrap();
        graph.set_edge(0, 4, true);
        graph.set_edge(3, 1, true);
        for i in 0..5 {
            graph.set_edge(i, i, true);
        }

        for i in 0..5 {
            assert!(!graph.edge(i, i));
            for j in 0..5 {
                assert_eq!(graph.edge(i, j), graph.edge(j, i));
            }
        }
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_degrees() {
        let graph = path4();
        assert_eq!(graph.degrees(), vec![1, 2, 2, 1]);
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.degree(3), 1);
    }

    #[test]
    fn test_move_by_round_trip() {
        let mut graph = path4();
        for (i, position) in graph.positions_mut().iter_mut().enumerate() {
            *position = Vector3::new(i as f64 * 2.0 - 3.0, -1.7, 2.25);
        }
        let original = graph.positions().to_vec();

        graph.move_by(Vector3::new(1.0, 0.0, 0.0));
        assert_ne!(graph.positions(), &original[..]);
        graph.move_by(Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(graph.positions(), &original[..]);
    }

    #[test]
    fn test_mass_center() {
        let mut graph = Graph::new(2).unwrap();
        graph.set_position(0, Vector3::new(0.0, 0.0, 0.0));
        graph.set_position(1, Vector3::new(0.0, 0.0, 20.0));
        assert_eq!(graph.mass_center(), Vector3::new(0.0, 0.0, 10.0));

        graph.move_by(-graph.mass_center());
        assert_eq!(graph.mass_center(), Vector3::ZERO);
    }

    #[test]
    fn test_from_edge_pairs() {
        let graph = Graph::from_edge_pairs(3, &[0, 1, 1, 2, 2, 2]).unwrap();
        assert!(graph.edge(0, 1));
        assert!(graph.edge(2, 1));
        assert_eq!(graph.edge_count(), 2);

        let err = Graph::from_edge_pairs(3, &[0, 3]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::NodeOutOfRange {
                index: 3,
                node_count: 3
            }
        );
    }

    #[test]
    fn test_from_petgraph() {
        let mut source = petgraph::Graph::<&str, ()>::new();
        let a = source.add_node("a");
        let b = source.add_node("b");
        let c = source.add_node("c");
        source.add_edge(a, b, ());
        source.add_edge(c, b, ());
        source.add_edge(c, c, ());

        let graph = Graph::from_petgraph(&source).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert!(graph.edge(0, 1));
        assert!(graph.edge(1, 2));
        assert_eq!(graph.edge_count(), 2);

        let empty = petgraph::Graph::<(), ()>::new();
        assert_eq!(Graph::from_petgraph(&empty), Err(LayoutError::EmptyGraph));
    }

    #[test]
    #[should_panic]
    fn test_position_out_of_range_panics() {
        let graph = Graph::new(2).unwrap();
        graph.position(2);
    }
}
