//! Succession strategies: which individuals survive into the next generation.

use super::fitness::{Individual, sort_by_fitness};

/// Decides which individuals make up the next generation.
pub trait Succession {
    /// Merge the old population and the offspring into `size` survivors.
    fn succeed(&self, population: Vec<Individual>, offspring: Vec<Individual>, size: usize) -> Vec<Individual>;
}

/// Offspring replace the population.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightSuccession;

impl Succession for StraightSuccession {
    fn succeed(&self, _population: Vec<Individual>, mut offspring: Vec<Individual>, size: usize) -> Vec<Individual> {
        offspring.truncate(size);
        offspring
    }
}

/// The best `size` of population and offspring together.
#[derive(Debug, Clone, Copy, Default)]
pub struct EliteOfUnionSuccession;

impl Succession for EliteOfUnionSuccession {
    fn succeed(&self, mut population: Vec<Individual>, mut offspring: Vec<Individual>, size: usize) -> Vec<Individual> {
        sort_by_fitness(&mut population);
        sort_by_fitness(&mut offspring);

        let mut old = population.into_iter().peekable();
        let mut new = offspring.into_iter().peekable();
        let mut survivors = Vec::with_capacity(size);

        while survivors.len() < size {
            let take_old = match (old.peek(), new.peek()) {
                (Some(a), Some(b)) => a.compare(b).is_le(),
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_old { old.next() } else { new.next() };
            survivors.extend(next);
        }
        survivors
    }
}

/// Round-robin over both sorted lists, starting with the old population's best.
#[derive(Debug, Clone, Copy, Default)]
pub struct EliteSumOfSuccession;

impl Succession for EliteSumOfSuccession {
    fn succeed(&self, mut population: Vec<Individual>, mut offspring: Vec<Individual>, size: usize) -> Vec<Individual> {
        sort_by_fitness(&mut population);
        sort_by_fitness(&mut offspring);

        let mut old = population.into_iter();
        let mut new = offspring.into_iter();
        let mut survivors = Vec::with_capacity(size);
        let mut from_old = true;

        while survivors.len() < size {
            let next = if from_old {
                old.next().or_else(|| new.next())
            } else {
                new.next().or_else(|| old.next())
            };
            match next {
                Some(individual) => survivors.push(individual),
                None => break,
            }
            from_old = !from_old;
        }
        survivors
    }
}
