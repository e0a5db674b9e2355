//! Configuration for the evolutionary solver.

use serde::{Deserialize, Serialize};

use super::crossover::{ArithmeticCrossover, Crossover, InterchangeCrossover, MeanCrossover};
use super::fitness::FitnessParams;
use super::selection::{
    ProportionalSelection, RandomUniformSelection, Selection, TournamentSelection, TrivialSelection,
};
use super::succession::{
    EliteOfUnionSuccession, EliteSumOfSuccession, StraightSuccession, Succession,
};
use crate::error::{LayoutError, LayoutResult};

/// Parent selection strategy, see [`selection`](super::selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionType {
    Trivial,
    RandomUniform,
    Proportional,
    Tournament,
}

/// Recombination strategy, see [`crossover`](super::crossover).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverType {
    Mean,
    Arithmetic,
    Interchange,
}

/// Survivor strategy, see [`succession`](super::succession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuccessionType {
    Straight,
    EliteOfUnion,
    EliteSumOf,
}

/// Configuration for the evolutionary solver.
///
/// Deserializes from camelCase objects; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvolutionConfig {
    /// Individuals per generation (default: 30).
    pub population_size: usize,
    /// Parent selection strategy (default: Tournament).
    pub selection_type: SelectionType,
    /// Contestants per tournament (default: 3).
    pub tournament_k: usize,
    /// Chance that a parent pair is recombined (default: 0.7).
    pub crossover_probability: f64,
    /// Recombination strategy (default: Arithmetic).
    pub crossover_type: CrossoverType,
    /// Chance that an offspring is mutated (default: 0.2).
    pub mutation_probability: f64,
    /// Sigma of the Gaussian shake applied to every node of a mutant (default: 0.5).
    pub mutation_sigma: f64,
    /// Survivor strategy (default: EliteOfUnion).
    pub succession_type: SuccessionType,
    /// Target edge length (default: 5.0).
    pub desired_distance: f64,
    /// Weight of the all-pairs repulsion term (default: 1.0).
    pub repulsion_constant: f64,
    /// Pairs closer than twice this are penalized (default: 0.5).
    pub exclusive_radius: f64,
    /// Radius of the ball the initial population is scattered in (default: 10.0).
    pub seed_radius: f64,
    /// Seed for the solver's random field. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            selection_type: SelectionType::Tournament,
            tournament_k: 3,
            crossover_probability: 0.7,
            crossover_type: CrossoverType::Arithmetic,
            mutation_probability: 0.2,
            mutation_sigma: 0.5,
            succession_type: SuccessionType::EliteOfUnion,
            desired_distance: 5.0,
            repulsion_constant: 1.0,
            exclusive_radius: 0.5,
            seed_radius: 10.0,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Check every option against its allowed range.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.population_size == 0 {
            return Err(LayoutError::config("populationSize must be at least 1"));
        }
        if self.selection_type == SelectionType::Tournament
            && (self.tournament_k == 0 || self.tournament_k > self.population_size)
        {
            return Err(LayoutError::config(format!(
                "tournamentK must lie in [1, {}], got {}",
                self.population_size, self.tournament_k
            )));
        }

        let probabilities = [
            ("crossoverProbability", self.crossover_probability),
            ("mutationProbability", self.mutation_probability),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(LayoutError::config(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }

        let non_negative = [
            ("mutationSigma", self.mutation_sigma),
            ("desiredDistance", self.desired_distance),
            ("repulsionConstant", self.repulsion_constant),
            ("exclusiveRadius", self.exclusive_radius),
            ("seedRadius", self.seed_radius),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Constants of the fitness function.
    pub fn fitness_params(&self) -> FitnessParams {
        FitnessParams {
            desired_distance: self.desired_distance,
            repulsion_constant: self.repulsion_constant,
            exclusive_radius: self.exclusive_radius,
        }
    }

    /// Build the configured selection strategy.
    pub fn selection(&self) -> Box<dyn Selection> {
        match self.selection_type {
            SelectionType::Trivial => Box::new(TrivialSelection),
            SelectionType::RandomUniform => Box::new(RandomUniformSelection),
            SelectionType::Proportional => Box::new(ProportionalSelection),
            SelectionType::Tournament => Box::new(TournamentSelection {
                k: self.tournament_k,
            }),
        }
    }

    /// Build the configured crossover strategy.
    pub fn crossover(&self) -> Box<dyn Crossover> {
        match self.crossover_type {
            CrossoverType::Mean => Box::new(MeanCrossover),
            CrossoverType::Arithmetic => Box::new(ArithmeticCrossover),
            CrossoverType::Interchange => Box::new(InterchangeCrossover),
        }
    }

    /// Build the configured succession strategy.
    pub fn succession(&self) -> Box<dyn Succession> {
        match self.succession_type {
            SuccessionType::Straight => Box::new(StraightSuccession),
            SuccessionType::EliteOfUnion => Box::new(EliteOfUnionSuccession),
            SuccessionType::EliteSumOf => Box::new(EliteSumOfSuccession),
        }
    }
}
