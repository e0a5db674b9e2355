//! Layout engines that move graph nodes toward a readable 3D arrangement.
//!
//! Two independent solvers share the [`LayoutSolver`] surface:
//! - [`ForceSolver`]: damped force-directed relaxation, stops when the
//!   kinetic energy drops below a threshold.
//! - [`EvolutionarySolver`]: generational genetic search over whole layouts.
//!
//! Both are synchronous. An external driver (an animation tick, a CLI loop)
//! decides how many iterations or generations to run per call and reads the
//! positions back afterwards.

pub mod events;
pub mod evolution;
pub mod force;

pub use events::{LayoutEvent, ListenerId, Listeners};
pub use evolution::{EvolutionConfig, EvolutionarySolver};
pub use force::{ForceConfig, ForceSolver};

use crate::graph::Graph;

/// Outcome of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Iterations or generations actually run.
    pub steps: usize,
    /// True if the solver reached its stability threshold during this call.
    pub stable: bool,
}

/// Common surface of the layout engines.
pub trait LayoutSolver {
    /// Run up to `count` iterations (force) or generations (evolution).
    fn advance(&mut self, count: usize) -> AdvanceReport;

    /// Current best layout.
    fn graph(&self) -> &Graph;

    /// Event callbacks notified after every `advance`.
    fn listeners(&mut self) -> &mut Listeners;
}
