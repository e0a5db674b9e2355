//! Topology generators.
//!
//! Every generator leaves all nodes at the origin; place them with
//! [`Scene::randomize_unset`](crate::scene::Scene::randomize_unset) or a
//! solver's initial disorder before laying out.

use super::Graph;
use crate::error::{LayoutError, LayoutResult};
use crate::math::RandomField;

/// Every node connected to every other node.
pub fn complete(node_count: usize) -> LayoutResult<Graph> {
    let mut graph = Graph::new(node_count)?;
    for pair in graph.pairs() {
        graph.set_edge(pair.from, pair.to, true);
    }
    Ok(graph)
}

/// `0 - 1 - 2 - ... - (n-1)`.
pub fn path(node_count: usize) -> LayoutResult<Graph> {
    let mut graph = Graph::new(node_count)?;
    for node in 1..node_count {
        graph.set_edge(node, node - 1, true);
    }
    Ok(graph)
}

/// A path whose ends are joined. Rings of one or two nodes degrade to a path.
pub fn ring(node_count: usize) -> LayoutResult<Graph> {
    let mut graph = path(node_count)?;
    if node_count > 2 {
        graph.set_edge(node_count - 1, 0, true);
    }
    Ok(graph)
}

/// `width x height` lattice, node `(x, y)` at index `y * width + x`.
pub fn grid(width: usize, height: usize) -> LayoutResult<Graph> {
    let mut graph = Graph::new(width * height)?;
    for y in 0..height {
        for x in 0..width {
            let node = y * width + x;
            if x + 1 < width {
                graph.set_edge(node, node + 1, true);
            }
            if y + 1 < height {
                graph.set_edge(node, node + width, true);
            }
        }
    }
    Ok(graph)
}

/// Erdős–Rényi graph: each pair connected independently with `probability`.
pub fn random(node_count: usize, probability: f64, field: &mut RandomField) -> LayoutResult<Graph> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(LayoutError::config(format!(
            "edge probability {probability} outside [0, 1]"
        )));
    }
    let mut graph = Graph::new(node_count)?;
    for pair in graph.pairs() {
        if field.chance(probability) {
            graph.set_edge(pair.from, pair.to, true);
        }
    }
    Ok(graph)
}
