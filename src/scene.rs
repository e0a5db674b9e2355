//! Scene - a graph paired with per-node display metadata.
//!
//! The scene is what loaders, generators and renderers exchange. It records
//! whether each node's position came from its source or still needs to be
//! placed, and can pick nodes by position for interactive viewers.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::graph::Graph;
use crate::math::{RandomField, Vector3};
use crate::spatial::SpatialIndex;

/// RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque white, the default node color.
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a color from its components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Display metadata for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMeta {
    pub name: String,
    pub color: Color,
    /// Position supplied by the loader or generator, `None` if the node
    /// still has to be placed.
    pub loaded_position: Option<Vector3>,
}

impl NodeMeta {
    /// White, unplaced node with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Color::WHITE,
            loaded_position: None,
        }
    }
}

/// A graph plus one [`NodeMeta`] per node.
pub struct Scene {
    graph: Graph,
    nodes: Vec<NodeMeta>,
    spatial: SpatialIndex,
}

impl Scene {
    /// Wrap a graph with default metadata (`"n0"`, `"n1"`, ... all unplaced).
    pub fn new(graph: Graph) -> Self {
        let nodes = (0..graph.node_count())
            .map(|node| NodeMeta::named(format!("n{node}")))
            .collect();
        Self {
            graph,
            nodes,
            spatial: SpatialIndex::new(),
        }
    }

    /// Wrap a graph with caller-provided metadata.
    ///
    /// Nodes whose `loaded_position` is set get that position in the graph.
    pub fn with_metadata(mut graph: Graph, nodes: Vec<NodeMeta>) -> LayoutResult<Self> {
        if nodes.len() != graph.node_count() {
            return Err(LayoutError::MetadataMismatch {
                metadata: nodes.len(),
                nodes: graph.node_count(),
            });
        }
        for (node, meta) in nodes.iter().enumerate() {
            if let Some(position) = meta.loaded_position {
                graph.set_position(node, position);
            }
        }
        Ok(Self {
            graph,
            nodes,
            spatial: SpatialIndex::new(),
        })
    }

    /// Number of nodes in the scene.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Get the underlying graph for edits.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Get the metadata of one node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn meta(&self, node: usize) -> &NodeMeta {
        &self.nodes[node]
    }

    /// Get the metadata of one node for edits.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn meta_mut(&mut self, node: usize) -> &mut NodeMeta {
        &mut self.nodes[node]
    }

    /// Record a known position for `node` and move it there.
    pub fn set_loaded_position(&mut self, node: usize, position: Vector3) {
        self.nodes[node].loaded_position = Some(position);
        self.graph.set_position(node, position);
    }

    /// Number of nodes that still need a position.
    pub fn unset_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|meta| meta.loaded_position.is_none())
            .count()
    }

    /// Place every unplaced node uniformly inside a ball of `radius`.
    ///
    /// Returns how many nodes were placed.
    pub fn randomize_unset(&mut self, field: &mut RandomField, radius: f64) -> usize {
        let mut placed = 0;
        for (node, meta) in self.nodes.iter_mut().enumerate() {
            if meta.loaded_position.is_none() {
                let position = field.uniform_in_sphere(radius);
                meta.loaded_position = Some(position);
                self.graph.set_position(node, position);
                placed += 1;
            }
        }
        log::debug!("placed {placed} unset nodes within radius {radius}");
        placed
    }

    /// `(index, metadata, current position)` for every node.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &NodeMeta, Vector3)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(move |(node, meta)| (node, meta, self.graph.position(node)))
    }

    /// Replace the graph's positions, for example with a solver's result.
    ///
    /// # Panics
    ///
    /// Panics if `graph` has a different node count.
    pub fn update_positions(&mut self, graph: &Graph) {
        self.graph.copy_positions_from(graph);
    }

    /// Split into the graph and its metadata.
    pub fn into_parts(self) -> (Graph, Vec<NodeMeta>) {
        (self.graph, self.nodes)
    }

    // =========================================================================
    // Picking
    // =========================================================================

    /// Rebuild the picking index from the current positions.
    ///
    /// Call after every solver step whose result will be picked against.
    pub fn rebuild_spatial_index(&mut self) {
        self.spatial.rebuild(self.graph.positions());
    }

    /// Nearest node to `point` within `max_distance`, as of the last rebuild.
    pub fn find_nearest_node(&self, point: Vector3, max_distance: f64) -> Option<usize> {
        self.spatial.nearest_within(point, max_distance)
    }

    /// Nodes within `radius` of `point`, as of the last rebuild.
    pub fn find_nodes_in_radius(&self, point: Vector3, radius: f64) -> Vec<usize> {
        self.spatial.in_radius(point, radius)
    }
}
