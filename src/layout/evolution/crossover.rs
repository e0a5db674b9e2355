//! Crossover strategies over node positions.
//!
//! Parents share one edge set, so crossover only recombines positions.

use crate::graph::Graph;
use crate::math::RandomField;

/// Recombines the positions of two parents sharing one edge set.
pub trait Crossover {
    /// Recombine two parents in place.
    fn cross(&self, a: &mut Graph, b: &mut Graph, field: &mut RandomField);
}

/// Parent A becomes the nodewise midpoint of both parents.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanCrossover;

impl Crossover for MeanCrossover {
    fn cross(&self, a: &mut Graph, b: &mut Graph, _field: &mut RandomField) {
        for (pa, &pb) in a.positions_mut().iter_mut().zip(b.positions()) {
            *pa = (*pa + pb) * 0.5;
        }
    }
}

/// Complementary blends `αA + (1-α)B` and `αB + (1-α)A`, one α per pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticCrossover;

impl Crossover for ArithmeticCrossover {
    fn cross(&self, a: &mut Graph, b: &mut Graph, field: &mut RandomField) {
        let alpha = field.uniform(0.0, 1.0);
        for (pa, pb) in a.positions_mut().iter_mut().zip(b.positions_mut()) {
            let (old_a, old_b) = (*pa, *pb);
            *pa = old_a * alpha + old_b * (1.0 - alpha);
            *pb = old_b * alpha + old_a * (1.0 - alpha);
        }
    }
}

/// One-point crossover over node index: swaps nodes `0..b` for a random
/// breakpoint `b` in `1..n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterchangeCrossover;

impl Crossover for InterchangeCrossover {
    fn cross(&self, a: &mut Graph, b: &mut Graph, field: &mut RandomField) {
        let node_count = a.node_count().min(b.node_count());
        if node_count < 2 {
            return;
        }
        let breakpoint = 1 + field.index(node_count - 1);
        a.positions_mut()[..breakpoint].swap_with_slice(&mut b.positions_mut()[..breakpoint]);
    }
}
