//! Spatial indexing for O(log n) node picking.
//!
//! This module provides an R-tree based spatial index for efficient
//! nearest-neighbor and range queries on laid-out nodes.

mod rtree;

pub use rtree::SpatialIndex;
