//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries over laid-out node positions:
//! - Nearest neighbor
//! - Point-in-radius
//! - Axis-aligned box intersection

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::math::Vector3;

/// A node position in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// Graph node index.
    pub node: usize,
    pub position: [f64; 3],
}

impl NodePoint {
    /// Create a new NodePoint.
    pub fn new(node: usize, position: Vector3) -> Self {
        Self {
            node,
            position: position.to_array(),
        }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        Vector3::from(self.position).distance_squared(Vector3::from(*point))
    }
}

/// Spatial index for picking nodes in layout space.
///
/// Positions change on every solver step, so the index is rebuilt in bulk
/// rather than updated incrementally.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Rebuild the index from one position per node, indexed by slice position.
    pub fn rebuild(&mut self, positions: &[Vector3]) {
        let points: Vec<_> = positions
            .iter()
            .enumerate()
            .map(|(node, &position)| NodePoint::new(node, position))
            .collect();
        self.tree = RTree::bulk_load(points);
    }

    /// Find the node closest to `point`.
    pub fn nearest(&self, point: Vector3) -> Option<usize> {
        self.tree
            .nearest_neighbor(&point.to_array())
            .map(|found| found.node)
    }

    /// Find the node closest to `point`, if it lies within `max_distance`.
    pub fn nearest_within(&self, point: Vector3, max_distance: f64) -> Option<usize> {
        let query = point.to_array();
        self.tree
            .nearest_neighbor(&query)
            .filter(|found| found.distance_2(&query) <= max_distance * max_distance)
            .map(|found| found.node)
    }

    /// All nodes within `radius` of `point`.
    pub fn in_radius(&self, point: Vector3, radius: f64) -> Vec<usize> {
        self.tree
            .locate_within_distance(point.to_array(), radius * radius)
            .map(|found| found.node)
            .collect()
    }

    /// All nodes inside the box spanned by two corners.
    pub fn in_box(&self, min: Vector3, max: Vector3) -> Vec<usize> {
        let envelope = AABB::from_corners(min.to_array(), max.to_array());
        self.tree
            .locate_in_envelope(&envelope)
            .map(|found| found.node)
            .collect()
    }

    /// Clear all nodes from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
