//! Generational genetic search over complete layouts.
//!
//! Every individual is a full copy of the graph: same edges, its own
//! positions. One generation runs selection, crossover and mutation on the
//! selected copies, then succession merges parents and offspring. After
//! each generation the best individual's positions are written back into
//! the solver's visible graph.

use super::config::EvolutionConfig;
use super::crossover::Crossover;
use super::fitness::{FitnessParams, Individual, sort_by_fitness};
use super::selection::Selection;
use super::succession::Succession;
use crate::error::LayoutResult;
use crate::graph::Graph;
use crate::layout::events::{LayoutEvent, Listeners};
use crate::layout::{AdvanceReport, LayoutSolver};
use crate::math::{RandomField, Vector3};

/// Genetic layout solver owning the graph it lays out.
///
/// The graph returned by [`LayoutSolver::graph`] always holds the positions
/// of the best individual found so far.
pub struct EvolutionarySolver {
    graph: Graph,
    config: EvolutionConfig,
    params: FitnessParams,
    field: RandomField,
    /// Sorted best first.
    population: Vec<Individual>,
    selection: Box<dyn Selection>,
    crossover: Box<dyn Crossover>,
    succession: Box<dyn Succession>,
    generation: u64,
    listeners: Listeners,
}

impl EvolutionarySolver {
    /// Create a solver seeded from `config.seed`.
    pub fn new(graph: Graph, config: EvolutionConfig) -> LayoutResult<Self> {
        let field = RandomField::from_optional_seed(config.seed);
        Self::with_random_field(graph, config, field)
    }

    /// Create a solver drawing from a caller-owned random field.
    ///
    /// The caller's layout is the first individual; the rest scatter every
    /// node uniformly within `seed_radius` of the origin.
    pub fn with_random_field(
        graph: Graph,
        config: EvolutionConfig,
        mut field: RandomField,
    ) -> LayoutResult<Self> {
        config.validate()?;
        let params = config.fitness_params();

        let mut population = Vec::with_capacity(config.population_size);
        population.push(Individual::new(graph.clone(), &params));
        while population.len() < config.population_size {
            let mut candidate = graph.clone();
            for position in candidate.positions_mut() {
                *position = field.uniform_in_sphere(config.seed_radius);
            }
            population.push(Individual::new(candidate, &params));
        }
        sort_by_fitness(&mut population);

        log::info!(
            "evolutionary solver: {} individuals of {} nodes, initial best fitness {:.4}",
            population.len(),
            graph.node_count(),
            population[0].fitness
        );

        let mut solver = Self {
            selection: config.selection(),
            crossover: config.crossover(),
            succession: config.succession(),
            graph,
            config,
            params,
            field,
            population,
            generation: 0,
            listeners: Listeners::new(),
        };
        solver.publish_best();
        Ok(solver)
    }

    /// Configuration the solver was built with.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Generations run since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Individuals of the current generation, best first.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Fittest individual of the current generation.
    pub fn best(&self) -> &Individual {
        &self.population[0]
    }

    /// Fitness of [`best`](Self::best). Lower is better.
    pub fn best_fitness(&self) -> f64 {
        self.population[0].fitness
    }

    /// Pin one node at `position` in every individual, then re-score and
    /// re-rank the population.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn set_position(&mut self, node: usize, position: Vector3) {
        for individual in &mut self.population {
            individual.graph.set_position(node, position);
            individual.reevaluate(&self.params);
        }
        sort_by_fitness(&mut self.population);
        self.publish_best();
    }

    /// Release the best layout.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    fn run_generation(&mut self) {
        let size = self.config.population_size;
        let mut offspring = self.selection.select(&self.population, size, &mut self.field);
        self.recombine(&mut offspring);

        let parents = std::mem::take(&mut self.population);
        let mut next = self.succession.succeed(parents, offspring, size);
        sort_by_fitness(&mut next);
        self.population = next;
        self.generation += 1;

        self.publish_best();
        log::debug!(
            "generation {}: best {:.4}, mean {:.4}",
            self.generation,
            self.best_fitness(),
            self.mean_fitness()
        );
    }

    /// Crossover over random pairs, then mutation, then re-scoring of
    /// every changed individual.
    fn recombine(&mut self, offspring: &mut [Individual]) {
        self.field.shuffle(offspring);
        let mut changed = vec![false; offspring.len()];

        for (pair, flags) in offspring.chunks_mut(2).zip(changed.chunks_mut(2)) {
            if let [a, b] = pair {
                if self.field.chance(self.config.crossover_probability) {
                    self.crossover.cross(&mut a.graph, &mut b.graph, &mut self.field);
                    flags.fill(true);
                }
            }
        }

        let sigma = self.config.mutation_sigma;
        for (individual, flag) in offspring.iter_mut().zip(changed.iter_mut()) {
            if self.field.chance(self.config.mutation_probability) {
                for position in individual.graph.positions_mut() {
                    *position = self.field.gaussian_perturb(*position, sigma);
                }
                *flag = true;
            }
        }

        for (individual, _) in offspring.iter_mut().zip(changed).filter(|(_, flag)| *flag) {
            individual.reevaluate(&self.params);
        }
    }

    fn publish_best(&mut self) {
        self.graph.copy_positions_from(&self.population[0].graph);
    }

    fn mean_fitness(&self) -> f64 {
        self.population.iter().map(|i| i.fitness).sum::<f64>() / self.population.len() as f64
    }
}

impl LayoutSolver for EvolutionarySolver {
    fn advance(&mut self, generations: usize) -> AdvanceReport {
        for _ in 0..generations {
            self.run_generation();
        }
        self.listeners.emit(LayoutEvent::Changed { steps: generations });
        AdvanceReport {
            steps: generations,
            stable: false,
        }
    }

    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn listeners(&mut self) -> &mut Listeners {
        &mut self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate;
    use crate::layout::evolution::config::{CrossoverType, SelectionType, SuccessionType};
    use crate::layout::evolution::fitness::evaluate;
    use std::cell::Cell;
    use std::rc::Rc;

    fn config(seed: u64) -> EvolutionConfig {
        EvolutionConfig {
            population_size: 12,
            seed: Some(seed),
            ..EvolutionConfig::default()
        }
    }

    #[test]
    fn test_population_seeded_from_caller_layout() {
        let solver = EvolutionarySolver::new(generate::ring(5).unwrap(), config(1)).unwrap();
        assert_eq!(solver.population().len(), 12);
        assert_eq!(solver.generation(), 0);

        // Every individual shares the caller's edges
        let edges = solver.graph().edge_matrix().clone();
        assert!(solver.population().iter().all(|i| *i.graph.edge_matrix() == edges));

        // Sorted best first and the visible graph shows the best
        let fitness: Vec<_> = solver.population().iter().map(|i| i.fitness).collect();
        assert!(fitness.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(solver.graph().positions(), solver.best().graph.positions());
    }

    #[test]
    fn test_cached_fitness_matches_evaluation() {
        let mut solver = EvolutionarySolver::new(generate::grid(2, 3).unwrap(), config(2)).unwrap();
        solver.advance(5);
        let params = solver.config().fitness_params();
        for individual in solver.population() {
            assert_eq!(individual.fitness, evaluate(&individual.graph, &params));
        }
    }

    #[test]
    fn test_elite_of_union_never_regresses() {
        let selections = [
            SelectionType::Trivial,
            SelectionType::RandomUniform,
            SelectionType::Proportional,
            SelectionType::Tournament,
        ];
        let crossovers = [
            CrossoverType::Mean,
            CrossoverType::Arithmetic,
            CrossoverType::Interchange,
        ];

        for (s, &selection_type) in selections.iter().enumerate() {
            for (c, &crossover_type) in crossovers.iter().enumerate() {
                let config = EvolutionConfig {
                    selection_type,
                    crossover_type,
                    succession_type: SuccessionType::EliteOfUnion,
                    mutation_probability: 0.5,
                    ..config((s * 10 + c) as u64)
                };
                let mut solver = EvolutionarySolver::new(generate::path(6).unwrap(), config).unwrap();

                let mut previous = solver.best_fitness();
                for _ in 0..15 {
                    solver.advance(1);
                    let best = solver.best_fitness();
                    assert!(
                        best <= previous,
                        "{selection_type:?}/{crossover_type:?} regressed from {previous} to {best}"
                    );
                    previous = best;
                }
            }
        }
    }

    #[test]
    fn test_evolution_improves_layout() {
        let mut solver = EvolutionarySolver::new(generate::path(4).unwrap(), config(3)).unwrap();
        let initial = solver.best_fitness();
        solver.advance(60);
        assert!(solver.best_fitness() < initial);
        assert_eq!(solver.generation(), 60);

        let visible = evaluate(solver.graph(), &solver.config().fitness_params());
        assert_eq!(visible, solver.best_fitness());
    }

    #[test]
    fn test_every_succession_keeps_population_size() {
        for succession_type in [
            SuccessionType::Straight,
            SuccessionType::EliteOfUnion,
            SuccessionType::EliteSumOf,
        ] {
            let config = EvolutionConfig {
                succession_type,
                population_size: 7,
                ..config(4)
            };
            let mut solver = EvolutionarySolver::new(generate::complete(4).unwrap(), config).unwrap();
            solver.advance(4);
            assert_eq!(solver.population().len(), 7, "{succession_type:?}");
        }
    }

    #[test]
    fn test_single_individual_population() {
        let config = EvolutionConfig {
            population_size: 1,
            tournament_k: 1,
            mutation_probability: 1.0,
            ..config(5)
        };
        let mut solver = EvolutionarySolver::new(generate::path(3).unwrap(), config).unwrap();
        let report = solver.advance(3);
        assert_eq!(report.steps, 3);
        assert!(!report.stable);
        assert_eq!(solver.population().len(), 1);
    }

    #[test]
    fn test_changed_event_per_advance() {
        let mut solver = EvolutionarySolver::new(generate::path(3).unwrap(), config(6)).unwrap();
        let events = Rc::new(Cell::new(0));
        let counter = Rc::clone(&events);
        solver.listeners().subscribe(move |event| {
            assert!(matches!(event, LayoutEvent::Changed { .. }));
            counter.set(counter.get() + 1);
        });
        solver.advance(2);
        solver.advance(1);
        assert_eq!(events.get(), 2);
    }

    #[test]
    fn test_set_position_applies_to_whole_population() {
        let mut solver = EvolutionarySolver::new(generate::path(4).unwrap(), config(8)).unwrap();
        solver.advance(3);
        let target = Vector3::new(1.5, -2.0, 0.25);
        solver.set_position(2, target);

        assert_eq!(solver.graph().position(2), target);
        assert_eq!(solver.graph().positions(), solver.best().graph.positions());

        let params = solver.config().fitness_params();
        let fitness: Vec<_> = solver.population().iter().map(|i| i.fitness).collect();
        assert!(fitness.windows(2).all(|w| w[0] <= w[1]));
        for individual in solver.population() {
            assert_eq!(individual.graph.position(2), target);
            assert_eq!(individual.fitness, evaluate(&individual.graph, &params));
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EvolutionConfig {
            mutation_probability: -1.0,
            ..config(7)
        };
        assert!(EvolutionarySolver::new(generate::path(3).unwrap(), config).is_err());
    }
}
