//! Parent selection strategies.
//!
//! Each strategy draws `count` individuals from the current population with
//! replacement and returns independent copies.

use super::fitness::Individual;
use crate::math::RandomField;

/// Picks the parents of the next generation.
pub trait Selection {
    /// Draw `count` independent copies from `population`. An empty
    /// population yields no parents.
    fn select(&self, population: &[Individual], count: usize, field: &mut RandomField) -> Vec<Individual>;
}

/// Copies the population as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrivialSelection;

impl Selection for TrivialSelection {
    fn select(&self, population: &[Individual], count: usize, _field: &mut RandomField) -> Vec<Individual> {
        population.iter().cycle().take(count).cloned().collect()
    }
}

/// Every individual equally likely.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUniformSelection;

impl Selection for RandomUniformSelection {
    fn select(&self, population: &[Individual], count: usize, field: &mut RandomField) -> Vec<Individual> {
        if population.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|_| population[field.index(population.len())].clone())
            .collect()
    }
}

/// Roulette wheel weighted by `1 / fitness`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalSelection;

impl ProportionalSelection {
    fn weight(fitness: f64) -> f64 {
        if fitness.is_finite() {
            1.0 / fitness.max(f64::EPSILON)
        } else {
            0.0
        }
    }
}

impl Selection for ProportionalSelection {
    fn select(&self, population: &[Individual], count: usize, field: &mut RandomField) -> Vec<Individual> {
        if population.is_empty() {
            return Vec::new();
        }

        let mut cumulative = Vec::with_capacity(population.len());
        let mut total = 0.0;
        for individual in population {
            total += Self::weight(individual.fitness);
            cumulative.push(total);
        }

        if !(total > 0.0 && total.is_finite()) {
            return RandomUniformSelection.select(population, count, field);
        }

        (0..count)
            .map(|_| {
                let ticket = field.uniform(0.0, total);
                let slot = cumulative
                    .partition_point(|&bound| bound <= ticket)
                    .min(population.len() - 1);
                population[slot].clone()
            })
            .collect()
    }
}

/// Best of `k` distinct random contestants, repeated per pick.
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelection {
    pub k: usize,
}

impl Selection for TournamentSelection {
    fn select(&self, population: &[Individual], count: usize, field: &mut RandomField) -> Vec<Individual> {
        if population.is_empty() {
            return Vec::new();
        }
        let k = self.k.clamp(1, population.len());
        (0..count)
            .map(|_| {
                let winner = field
                    .sample_indices(population.len(), k)
                    .into_iter()
                    .min_by(|&a, &b| population[a].compare(&population[b]))
                    .unwrap_or(0);
                population[winner].clone()
            })
            .collect()
    }
}
