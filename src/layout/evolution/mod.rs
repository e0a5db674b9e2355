//! Evolutionary layout search.
//!
//! Strategies for selection, crossover and succession sit behind small
//! traits and are chosen at construction time from [`EvolutionConfig`].

pub mod config;
pub mod crossover;
pub mod fitness;
pub mod selection;
pub mod solver;
pub mod succession;

pub use config::{CrossoverType, EvolutionConfig, SelectionType, SuccessionType};
pub use crossover::{ArithmeticCrossover, Crossover, InterchangeCrossover, MeanCrossover};
pub use fitness::{FitnessParams, Individual, evaluate, sort_by_fitness};
pub use selection::{
    ProportionalSelection, RandomUniformSelection, Selection, TournamentSelection, TrivialSelection,
};
pub use solver::EvolutionarySolver;
pub use succession::{EliteOfUnionSuccession, EliteSumOfSuccession, StraightSuccession, Succession};
