//! Graph Layout 3D - WASM Module
//!
//! This module provides the core data structures and layout solvers for
//! placing the nodes of an undirected graph in 3D space. It is compiled to
//! WebAssembly and exposes a JavaScript-friendly API via wasm-bindgen, and
//! doubles as a plain Rust library.
//!
//! # Architecture
//!
//! - `math`: `Vector3` and the seeded `RandomField`
//! - `graph`: node positions plus a condensed edge matrix, and generators
//! - `layout`: the force-directed and evolutionary solvers
//! - `scene`: a graph with per-node metadata and node picking
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing

use js_sys::Float32Array;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod graph;
pub mod layout;
pub mod math;
pub mod scene;
pub mod spatial;

pub use error::{LayoutError, LayoutResult};
pub use graph::Graph;
pub use layout::{
    AdvanceReport, EvolutionConfig, EvolutionarySolver, ForceConfig, ForceSolver, LayoutEvent,
    LayoutSolver,
};
pub use math::{RandomField, Vector3};
pub use scene::Scene;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Deserialize a solver config, `undefined` and `null` meaning all defaults.
fn config_from_js<T: DeserializeOwned + Default>(config: JsValue) -> Result<T, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(T::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}

/// Interleave positions into `[x0, y0, z0, x1, y1, z1, ...]`.
fn interleaved_positions(graph: &Graph) -> Vec<f32> {
    graph
        .positions()
        .iter()
        .flat_map(|p| p.to_f32_array())
        .collect()
}

fn checked_node(graph: &Graph, node: usize) -> LayoutResult<usize> {
    if node < graph.node_count() {
        Ok(node)
    } else {
        Err(LayoutError::NodeOutOfRange {
            index: node,
            node_count: graph.node_count(),
        })
    }
}

/// Force-directed layout exposed to JavaScript.
#[wasm_bindgen]
pub struct ForceLayoutWasm {
    solver: ForceSolver,
}

#[wasm_bindgen]
impl ForceLayoutWasm {
    /// Create a solver over `node_count` nodes, all at the origin.
    ///
    /// # Arguments
    ///
    /// * `node_count` - Number of nodes, at least 1
    /// * `edges` - Flat array of undirected edge pairs [a0, b0, a1, b1, ...]
    /// * `config` - Partial `ForceConfig` object, or undefined for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(node_count: usize, edges: &[u32], config: JsValue) -> Result<ForceLayoutWasm, JsError> {
        let graph = Graph::from_edge_pairs(node_count, edges)?;
        let config: ForceConfig = config_from_js(config)?;
        Ok(Self {
            solver: ForceSolver::new(graph, config)?,
        })
    }

    /// Run up to `iterations` steps. Returns true once the layout is stable.
    pub fn advance(&mut self, iterations: usize) -> bool {
        self.solver.advance(iterations).stable
    }

    /// Copy of the positions as [x0, y0, z0, x1, y1, z1, ...].
    pub fn positions(&self) -> Float32Array {
        Float32Array::from(&interleaved_positions(self.solver.graph())[..])
    }

    /// Pin a node at a position and zero its velocity (e.g. while dragging).
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, node: usize, x: f64, y: f64, z: f64) -> Result<(), JsError> {
        let node = checked_node(self.solver.graph(), node)?;
        self.solver.set_position(node, Vector3::new(x, y, z));
        Ok(())
    }

    /// Kinetic energy after the most recent step.
    pub fn energy(&self) -> f64 {
        self.solver.energy()
    }

    /// Whether the last `advance` that ran any steps reached the threshold.
    #[wasm_bindgen(js_name = isStable)]
    pub fn is_stable(&self) -> bool {
        self.solver.is_stable()
    }

    /// Number of nodes in the layout.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.solver.graph().node_count()
    }
}

/// Evolutionary layout exposed to JavaScript.
#[wasm_bindgen]
pub struct EvolutionLayoutWasm {
    solver: EvolutionarySolver,
}

#[wasm_bindgen]
impl EvolutionLayoutWasm {
    /// Create a solver whose initial population is seeded around the origin.
    ///
    /// # Arguments
    ///
    /// * `node_count` - Number of nodes, at least 1
    /// * `edges` - Flat array of undirected edge pairs [a0, b0, a1, b1, ...]
    /// * `config` - Partial `EvolutionConfig` object, or undefined for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(node_count: usize, edges: &[u32], config: JsValue) -> Result<EvolutionLayoutWasm, JsError> {
        let graph = Graph::from_edge_pairs(node_count, edges)?;
        let config: EvolutionConfig = config_from_js(config)?;
        Ok(Self {
            solver: EvolutionarySolver::new(graph, config)?,
        })
    }

    /// Run `generations` generations.
    pub fn advance(&mut self, generations: usize) {
        self.solver.advance(generations);
    }

    /// Positions of the best individual as [x0, y0, z0, x1, y1, z1, ...].
    pub fn positions(&self) -> Float32Array {
        Float32Array::from(&interleaved_positions(self.solver.graph())[..])
    }

    /// Pin a node at a position in every individual of the population.
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, node: usize, x: f64, y: f64, z: f64) -> Result<(), JsError> {
        let node = checked_node(self.solver.graph(), node)?;
        self.solver.set_position(node, Vector3::new(x, y, z));
        Ok(())
    }

    /// Fitness of the best individual. Lower is better.
    #[wasm_bindgen(js_name = bestFitness)]
    pub fn best_fitness(&self) -> f64 {
        self.solver.best_fitness()
    }

    /// Generations run so far.
    pub fn generation(&self) -> f64 {
        self.solver.generation() as f64
    }

    /// Number of nodes in the layout.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.solver.graph().node_count()
    }
}
