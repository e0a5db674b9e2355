//! Force-directed relaxation in 3D.
//!
//! Every node pair repels with an inverse-square force, connected pairs are
//! additionally joined by a Hookean spring of rest length
//! `desired_distance`, and a soft wall keeps the layout within
//! `max_distance` of the origin. Positions are advanced with a damped
//! semi-implicit Euler step until the kinetic energy drops below
//! [`STABLE_ENERGY`].
//!
//! # Step outline
//!
//! 1. Pair forces over all `(from, to)` with `from > to`, applied with
//!    opposite signs to both nodes.
//! 2. Centering force per node.
//! 3. Integration, velocity clamping, damping.
//! 4. Optional re-centering of the whole graph on its mass center.

use serde::{Deserialize, Serialize};

use super::events::{LayoutEvent, Listeners};
use super::{AdvanceReport, LayoutSolver};
use crate::error::{LayoutError, LayoutResult};
use crate::graph::Graph;
use crate::math::{RandomField, Vector3};

/// Total kinetic energy below which the layout counts as stable.
pub const STABLE_ENERGY: f64 = 0.0001;

/// Pairs closer than this are treated as coincident.
const HIT_DISTANCE: f64 = 0.01;

/// Disorder sigmas below this skip the initial perturbation.
const DISORDER_EPSILON: f64 = 1e-6;

/// Configuration for the force solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceConfig {
    /// Inverse-square repulsion between every pair (default: 1.0).
    pub repulsion_force: f64,
    /// Spring constant along edges (default: 1.0).
    pub attraction_force: f64,
    /// Magnitude of the random kick between coincident nodes (default: 1.0).
    pub hit_force: f64,
    /// Strength of the soft wall pulling nodes back toward the origin (default: 1.0).
    pub middle_force: f64,
    /// Rest length of edge springs (default: 5.0).
    pub desired_distance: f64,
    /// Velocity retained after each step, in (0, 1) (default: 0.6).
    ///
    /// With the default spring and time step, retentions above roughly 0.75
    /// leave edges ringing around their rest length, and the energy test can
    /// then fire at a turning point far from equilibrium.
    pub damping: f64,
    /// Maximum node speed (default: 10.0).
    pub velocity_limit: f64,
    /// Maximum per-step displacement before scaling by `dt` (default: 5.0).
    pub move_limit: f64,
    /// Radius of the soft wall (default: 100.0).
    pub max_distance: f64,
    /// Scale repulsion by the product of the pair's degrees (default: false).
    pub attraction_multiplied_by_degree: bool,
    /// Re-center the layout on its mass center after each step (default: true).
    pub mass_center_fix: bool,
    /// Sigma of the Gaussian shake applied once before the first step (default: 0.0).
    pub position_disorder_sigma: f64,
    /// Time step (default: 0.1).
    pub dt: f64,
    /// Seed for the solver's random field. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            repulsion_force: 1.0,
            attraction_force: 1.0,
            hit_force: 1.0,
            middle_force: 1.0,
            desired_distance: 5.0,
            damping: 0.6,
            velocity_limit: 10.0,
            move_limit: 5.0,
            max_distance: 100.0,
            attraction_multiplied_by_degree: false,
            mass_center_fix: true,
            position_disorder_sigma: 0.0,
            dt: 0.1,
            seed: None,
        }
    }
}

impl ForceConfig {
    /// Check every option against its allowed range.
    pub fn validate(&self) -> LayoutResult<()> {
        let non_negative = [
            ("repulsionForce", self.repulsion_force),
            ("attractionForce", self.attraction_force),
            ("hitForce", self.hit_force),
            ("middleForce", self.middle_force),
            ("desiredDistance", self.desired_distance),
            ("positionDisorderSigma", self.position_disorder_sigma),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        let positive = [
            ("dt", self.dt),
            ("velocityLimit", self.velocity_limit),
            ("moveLimit", self.move_limit),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::config(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(LayoutError::config(format!(
                "damping must lie in (0, 1), got {}",
                self.damping
            )));
        }
        if !self.max_distance.is_finite() || self.max_distance <= 1.5 {
            return Err(LayoutError::config(format!(
                "maxDistance must be greater than 1.5, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }
}

/// Per-node simulation state, alive only while a solver owns the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeState {
    pub velocity: Vector3,
    /// Force accumulator, zeroed after every step.
    pub force: Vector3,
    pub degree: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Running,
}

/// Damped force-directed solver owning the graph it lays out.
pub struct ForceSolver {
    graph: Graph,
    config: ForceConfig,
    field: RandomField,
    states: Vec<NodeState>,
    phase: Phase,
    energy: f64,
    stable: bool,
    steps: u64,
    listeners: Listeners,
}

impl ForceSolver {
    /// Create a solver seeded from `config.seed`.
    pub fn new(graph: Graph, config: ForceConfig) -> LayoutResult<Self> {
        let field = RandomField::from_optional_seed(config.seed);
        Self::with_random_field(graph, config, field)
    }

    /// Create a solver drawing from a caller-owned random field.
    pub fn with_random_field(
        graph: Graph,
        config: ForceConfig,
        field: RandomField,
    ) -> LayoutResult<Self> {
        config.validate()?;

        let states = graph
            .degrees()
            .into_iter()
            .map(|degree| NodeState {
                degree,
                ..NodeState::default()
            })
            .collect();

        log::info!(
            "force solver attached to {} nodes / {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            config,
            field,
            states,
            phase: Phase::Uninitialized,
            energy: f64::INFINITY,
            stable: false,
            steps: 0,
            listeners: Listeners::new(),
        })
    }

    /// Configuration the solver was built with.
    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    /// Kinetic energy after the most recent step (infinite before the first).
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Whether the most recent `advance` that ran at least one step ended on
    /// the stability threshold. `advance(0)` keeps the verdict, `set_position`
    /// clears it.
    pub fn is_stable(&self) -> bool {
        self.stable
    }

    /// Physical steps run since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Velocity, pending force and degree of every node, by node index.
    pub fn node_states(&self) -> &[NodeState] {
        &self.states
    }

    /// Move one node (for example while the user drags it) and stop it.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn set_position(&mut self, node: usize, position: Vector3) {
        self.graph.set_position(node, position);
        self.states[node].velocity = Vector3::ZERO;
        self.stable = false;
    }

    /// Release the laid-out graph.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    fn initialize(&mut self) {
        let sigma = self.config.position_disorder_sigma;
        if sigma >= DISORDER_EPSILON {
            for position in self.graph.positions_mut() {
                *position = self.field.gaussian_perturb(*position, sigma);
            }
            log::debug!("applied initial disorder with sigma {sigma}");
        }
        self.phase = Phase::Running;
    }

    /// One physical step. Returns the kinetic energy it ended with.
    fn step(&mut self) -> f64 {
        self.accumulate_pair_forces();
        self.accumulate_centering_forces();
        let energy = self.integrate();

        if self.config.mass_center_fix {
            let center = self.graph.mass_center();
            self.graph.move_by(-center);
        }
        energy
    }

    fn accumulate_pair_forces(&mut self) {
        let config = &self.config;
        let edges = self.graph.edge_matrix();
        let positions = self.graph.positions();

        for pair in self.graph.pairs() {
            let (from, to) = (pair.from, pair.to);
            let mut r = positions[from] - positions[to];
            let d = r.length();

            if d < HIT_DISTANCE {
                r = self.field.unit_vector() * config.hit_force;
            } else {
                let mut f = config.repulsion_force / (d * d);
                if config.attraction_multiplied_by_degree {
                    f *= (self.states[from].degree * self.states[to].degree) as f64;
                }
                if edges.get_condensed(pair.index) {
                    f -= config.attraction_force * (d - config.desired_distance);
                }
                r *= f / d;
            }

            self.states[from].force += r;
            self.states[to].force -= r;
        }
    }

    fn accumulate_centering_forces(&mut self) {
        let max_distance = self.config.max_distance;
        let middle_force = self.config.middle_force;

        for (state, &position) in self.states.iter_mut().zip(self.graph.positions()) {
            let l = position.length();
            if l > 1.0 {
                let d = l.min(max_distance - 0.5);
                let inv = 1.0 / (max_distance - d);
                state.force -= position * (middle_force * inv * inv / l);
            }
        }
    }

    fn integrate(&mut self) -> f64 {
        let config = &self.config;
        let dt = config.dt;
        let mut energy = 0.0;

        for (state, position) in self.states.iter_mut().zip(self.graph.positions_mut()) {
            state.velocity += state.force * dt;
            state.velocity = state.velocity.limit(config.velocity_limit);
            energy += state.velocity.length_squared();

            let displacement = (state.force * (dt / 2.0) + state.velocity).limit(config.move_limit);
            *position += displacement * dt;

            state.velocity *= config.damping;
            state.force = Vector3::ZERO;
        }
        energy
    }
}

impl LayoutSolver for ForceSolver {
    fn advance(&mut self, iterations: usize) -> AdvanceReport {
        if self.phase == Phase::Uninitialized {
            self.initialize();
        }

        // A zero-step call leaves the previous verdict in place
        let mut steps = 0;
        let mut reached = false;
        for _ in 0..iterations {
            self.energy = self.step();
            steps += 1;
            self.steps += 1;
            log::trace!("force step {}: energy {:.6}", self.steps, self.energy);

            if self.energy < STABLE_ENERGY {
                reached = true;
                break;
            }
        }
        if steps > 0 {
            self.stable = reached;
        }

        log::debug!(
            "force advance ran {steps}/{iterations} steps, energy {:.6}",
            self.energy
        );
        self.listeners.emit(LayoutEvent::Changed { steps });
        if reached {
            log::info!("layout stable after {} steps", self.steps);
            self.listeners.emit(LayoutEvent::Stable {
                energy: self.energy,
            });
        }

        AdvanceReport {
            steps,
            stable: self.stable,
        }
    }

    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn listeners(&mut self) -> &mut Listeners {
        &mut self.listeners
    }
}
