//! Layout fitness and the individuals that carry it.
//!
//! Lower fitness is better. The score mirrors the force model's energy: a
//! spring term along edges, repulsion between every pair, and a steep
//! penalty for near-collisions.

use std::cmp::Ordering;

use crate::graph::Graph;

/// Constants of the fitness function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessParams {
    pub desired_distance: f64,
    pub repulsion_constant: f64,
    pub exclusive_radius: f64,
}

/// Weight of the near-collision penalty.
const COLLISION_PENALTY: f64 = 5.0;

/// Score a layout. Lower is better.
///
/// For every unordered pair at distance `d`:
/// - connected pairs add `|desired_distance - d|`,
/// - every pair, connected or not, adds `repulsion_constant / d`,
/// - pairs closer than `2 * exclusive_radius` add
///   `5 * (2 * exclusive_radius - d)`.
///
/// Coincident nodes score `+inf` whenever repulsion is non-zero.
pub fn evaluate(graph: &Graph, params: &FitnessParams) -> f64 {
    let positions = graph.positions();
    let edges = graph.edge_matrix();
    let exclusion = 2.0 * params.exclusive_radius;

    let mut total = 0.0;
    for pair in graph.pairs() {
        let d = positions[pair.from].distance(positions[pair.to]);
        if edges.get_condensed(pair.index) {
            total += (params.desired_distance - d).abs();
        }
        // Applies to connected pairs too.
        if params.repulsion_constant != 0.0 {
            total += params.repulsion_constant / d;
        }
        if d < exclusion {
            total += COLLISION_PENALTY * (exclusion - d);
        }
    }
    total
}

/// One candidate layout with its cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub graph: Graph,
    pub fitness: f64,
}

impl Individual {
    /// Wrap a layout and score it.
    pub fn new(graph: Graph, params: &FitnessParams) -> Self {
        let fitness = evaluate(&graph, params);
        Self { graph, fitness }
    }

    /// Recompute the cached fitness after the positions changed.
    pub fn reevaluate(&mut self, params: &FitnessParams) {
        self.fitness = evaluate(&self.graph, params);
    }

    /// Total order on fitness, best first. NaN sorts last.
    pub fn compare(&self, other: &Individual) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

/// Sort best (lowest fitness) first.
pub fn sort_by_fitness(individuals: &mut [Individual]) {
    individuals.sort_by(Individual::compare);
}
