//! Acquisition maximizers.
//!
//! A maximizer searches the bounded box for the point with the highest
//! acquisition score. It carries no state between calls: everything it
//! needs arrives as arguments, so the optimizer can swap one for another
//! freely.
//!
//! | Maximizer | Algorithm | Cost per call |
//! |-----------|-----------|---------------|
//! | [`DifferentialEvolution`] | Population-based DE with binomial crossover (default) | up to `population × (generations + 1) × restarts` scores |
//! | [`RandomSearch`] | Best of uniformly drawn candidates | `n_candidates` scores |
//!
//! Both clip their answer into the bounds before returning it.
//!
//! # Examples
//!
//! ```
//! use bayes_opt::Bounds;
//! use bayes_opt::maximizer::{AcquisitionMaximizer, DifferentialEvolution};
//!
//! let bounds = Bounds::new([("x", (-5.0, 5.0))]).unwrap();
//! let peak = |x: &[f64]| -> bayes_opt::Result<f64> { Ok(-(x[0] - 2.0).powi(2)) };
//!
//! let de = DifferentialEvolution::builder().population_size(20).build();
//! let mut rng = fastrand::Rng::with_seed(7);
//! let best = de.maximize(&peak, &bounds, &mut rng).unwrap();
//! assert!((best[0] - 2.0).abs() < 1e-2);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::acquisition::AcquisitionFunction;
use crate::bounds::Bounds;
use crate::error::Result;
use crate::rng_util;

/// Finds an (approximate) maximizer of an acquisition function in a box.
pub trait AcquisitionMaximizer {
    /// Return a point inside `bounds` with a high acquisition score.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while scoring candidates.
    fn maximize(
        &self,
        acquisition: &dyn AcquisitionFunction,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Result<Vec<f64>>;
}

impl<M: AcquisitionMaximizer + ?Sized> AcquisitionMaximizer for Box<M> {
    fn maximize(
        &self,
        acquisition: &dyn AcquisitionFunction,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Result<Vec<f64>> {
        (**self).maximize(acquisition, bounds, rng)
    }
}

// ---------------------------------------------------------------------------
// Differential Evolution
// ---------------------------------------------------------------------------

/// Default number of population members.
const DEFAULT_POPULATION: usize = 100;
/// Default generation cap per restart.
const DEFAULT_MAX_GENERATIONS: usize = 400;
/// Default relative convergence tolerance.
const DEFAULT_TOLERANCE: f64 = 1e-3;
/// Default differential weight F.
const DEFAULT_MUTATION: f64 = 0.8;
/// Default crossover probability CR.
const DEFAULT_CROSSOVER: f64 = 0.9;
/// `Rand1` draws three members distinct from the target.
const MIN_POPULATION: usize = 4;

/// Differential Evolution mutation strategy.
///
/// Controls how mutant vectors are created from the current population.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DEStrategy {
    /// DE/rand/1: `v = x_r1 + F * (x_r2 - x_r3)`
    ///
    /// The most robust strategy. Uses three random population members.
    Rand1,
    /// DE/best/1: `v = x_best + F * (x_r1 - x_r2)`
    ///
    /// Greedier strategy that biases toward the current best solution.
    #[default]
    Best1,
    /// DE/current-to-best/1: `v = x_i + F * (x_best - x_i) + F * (x_r1 - x_r2)`
    ///
    /// Balances exploration and exploitation by blending the current
    /// individual with the best.
    CurrentToBest1,
}

/// Bounded, derivative-free global maximizer.
///
/// Each restart evolves a fresh random population until the spread of
/// population scores satisfies `std ≤ atol + tolerance · |mean|` or the
/// generation cap is hit. The best member over all restarts is returned.
#[derive(Clone, Debug, PartialEq)]
pub struct DifferentialEvolution {
    population_size: usize,
    max_generations: usize,
    tolerance: f64,
    atol: f64,
    mutation_factor: f64,
    crossover_rate: f64,
    strategy: DEStrategy,
    restarts: usize,
}

impl DifferentialEvolution {
    /// Creates a maximizer with default settings.
    #[must_use]
    pub fn new() -> Self {
        DifferentialEvolutionBuilder::new().build()
    }

    /// Creates a builder for configuring a `DifferentialEvolution`.
    #[must_use]
    pub fn builder() -> DifferentialEvolutionBuilder {
        DifferentialEvolutionBuilder::new()
    }

    /// Effective population size.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Generation cap per restart.
    #[must_use]
    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    /// Number of independent restarts.
    #[must_use]
    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

impl Default for DifferentialEvolution {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`DifferentialEvolution`] maximizer.
///
/// All options have sensible defaults:
/// - `population_size`: 100 (raised to at least 4)
/// - `max_generations`: 400
/// - `tolerance`: 1e-3, `atol`: 0
/// - `mutation_factor` (F): 0.8
/// - `crossover_rate` (CR): 0.9
/// - `strategy`: `Best1`
/// - `restarts`: 1
///
/// # Examples
///
/// ```
/// use bayes_opt::maximizer::{DEStrategy, DifferentialEvolutionBuilder};
///
/// let de = DifferentialEvolutionBuilder::new()
///     .population_size(40)
///     .max_generations(100)
///     .strategy(DEStrategy::Rand1)
///     .restarts(3)
///     .build();
/// assert_eq!(de.restarts(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct DifferentialEvolutionBuilder {
    population_size: usize,
    max_generations: usize,
    tolerance: f64,
    atol: f64,
    mutation_factor: f64,
    crossover_rate: f64,
    strategy: DEStrategy,
    restarts: usize,
}

impl Default for DifferentialEvolutionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DifferentialEvolutionBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            population_size: DEFAULT_POPULATION,
            max_generations: DEFAULT_MAX_GENERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            atol: 0.0,
            mutation_factor: DEFAULT_MUTATION,
            crossover_rate: DEFAULT_CROSSOVER,
            strategy: DEStrategy::default(),
            restarts: 1,
        }
    }

    /// Sets the number of population members.
    ///
    /// Values below 4 are raised to 4.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the maximum number of generations per restart.
    #[must_use]
    pub fn max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the relative convergence tolerance.
    #[must_use]
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Sets the absolute convergence tolerance.
    #[must_use]
    pub fn atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// Sets the mutation factor (F).
    ///
    /// Typical values are in `[0.5, 1.0]`. Higher values increase
    /// exploration; lower values favor exploitation.
    #[must_use]
    pub fn mutation_factor(mut self, f: f64) -> Self {
        self.mutation_factor = f;
        self
    }

    /// Sets the crossover rate (CR).
    ///
    /// Probability of each dimension being taken from the mutant vector
    /// rather than the parent.
    #[must_use]
    pub fn crossover_rate(mut self, cr: f64) -> Self {
        self.crossover_rate = cr;
        self
    }

    /// Sets the mutation strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: DEStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the number of independent restarts. Zero is treated as one.
    #[must_use]
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Builds the configured [`DifferentialEvolution`].
    #[must_use]
    pub fn build(self) -> DifferentialEvolution {
        DifferentialEvolution {
            population_size: self.population_size.max(MIN_POPULATION),
            max_generations: self.max_generations,
            tolerance: self.tolerance,
            atol: self.atol,
            mutation_factor: self.mutation_factor,
            crossover_rate: self.crossover_rate,
            strategy: self.strategy,
            restarts: self.restarts.max(1),
        }
    }
}

/// One restart's population and its scores.
struct Population {
    members: Vec<Vec<f64>>,
    scores: Vec<f64>,
    best_idx: usize,
}

impl Population {
    fn random(
        size: usize,
        acquisition: &dyn AcquisitionFunction,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Result<Self> {
        let members: Vec<Vec<f64>> = (0..size)
            .map(|_| rng_util::uniform_point(rng, bounds))
            .collect();
        let scores = members
            .iter()
            .map(|m| acquisition.score(m))
            .collect::<Result<Vec<f64>>>()?;
        let mut population = Self {
            members,
            scores,
            best_idx: 0,
        };
        population.update_best();
        Ok(population)
    }

    fn update_best(&mut self) {
        let mut best = f64::NEG_INFINITY;
        for (i, &s) in self.scores.iter().enumerate() {
            if s > best {
                best = s;
                self.best_idx = i;
            }
        }
    }

    fn best(&self) -> (&[f64], f64) {
        (&self.members[self.best_idx], self.scores[self.best_idx])
    }

    #[allow(clippy::cast_precision_loss)]
    fn converged(&self, tolerance: f64, atol: f64) -> bool {
        let n = self.scores.len() as f64;
        let mean = self.scores.iter().sum::<f64>() / n;
        let var = self.scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        var.sqrt() <= atol + tolerance * mean.abs()
    }
}

/// Select `count` distinct random indices from `0..n`, all different from `exclude`.
fn select_random_indices(
    rng: &mut fastrand::Rng,
    n: usize,
    count: usize,
    exclude: usize,
) -> Vec<usize> {
    let mut selected = Vec::with_capacity(count);
    while selected.len() < count {
        let idx = rng.usize(0..n);
        if idx != exclude && !selected.contains(&idx) {
            selected.push(idx);
        }
    }
    selected
}

impl DifferentialEvolution {
    fn mutant(&self, pop: &Population, target: usize, rng: &mut fastrand::Rng) -> Vec<f64> {
        let x = &pop.members;
        let best = pop.best_idx;
        let f = self.mutation_factor;
        let n = x.len();
        let d = x[target].len();

        match self.strategy {
            DEStrategy::Rand1 => {
                let r = select_random_indices(rng, n, 3, target);
                (0..d)
                    .map(|j| x[r[0]][j] + f * (x[r[1]][j] - x[r[2]][j]))
                    .collect()
            }
            DEStrategy::Best1 => {
                let r = select_random_indices(rng, n, 2, target);
                (0..d)
                    .map(|j| x[best][j] + f * (x[r[0]][j] - x[r[1]][j]))
                    .collect()
            }
            DEStrategy::CurrentToBest1 => {
                let r = select_random_indices(rng, n, 2, target);
                (0..d)
                    .map(|j| {
                        x[target][j]
                            + f * (x[best][j] - x[target][j])
                            + f * (x[r[0]][j] - x[r[1]][j])
                    })
                    .collect()
            }
        }
    }

    /// Mutation plus binomial crossover, clamped into bounds.
    fn trial_vector(
        &self,
        pop: &Population,
        target: usize,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Vec<f64> {
        let mutant = self.mutant(pop, target, rng);
        let parent = &pop.members[target];
        let j_rand = rng.usize(0..parent.len());
        let mut trial: Vec<f64> = mutant
            .iter()
            .zip(parent)
            .enumerate()
            .map(|(j, (&m, &p))| {
                if j == j_rand || rng.f64() < self.crossover_rate {
                    m
                } else {
                    p
                }
            })
            .collect();
        bounds.clip(&mut trial);
        trial
    }

    /// Run one restart to completion and return its population.
    fn evolve(
        &self,
        acquisition: &dyn AcquisitionFunction,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Result<Population> {
        let mut pop = Population::random(self.population_size, acquisition, bounds, rng)?;

        for _generation in 0..self.max_generations {
            if pop.converged(self.tolerance, self.atol) {
                trace_debug!(generation = _generation, "differential evolution converged");
                break;
            }

            let trials: Vec<Vec<f64>> = (0..self.population_size)
                .map(|i| self.trial_vector(&pop, i, bounds, rng))
                .collect();

            for (i, trial) in trials.into_iter().enumerate() {
                let score = acquisition.score(&trial)?;
                if score >= pop.scores[i] {
                    pop.members[i] = trial;
                    pop.scores[i] = score;
                }
            }
            pop.update_best();
        }

        Ok(pop)
    }
}

impl AcquisitionMaximizer for DifferentialEvolution {
    fn maximize(
        &self,
        acquisition: &dyn AcquisitionFunction,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Result<Vec<f64>> {
        let mut best_x: Vec<f64> = bounds.iter().map(|b| b.low).collect();
        let mut best_score: Option<f64> = None;

        for _restart in 0..self.restarts {
            let pop = self.evolve(acquisition, bounds, rng)?;
            let (x, score) = pop.best();
            trace_debug!(restart = _restart, score, "acquisition restart finished");
            if best_score.is_none_or(|b| score >= b) {
                best_x = x.to_vec();
                best_score = Some(score);
            }
        }

        bounds.clip(&mut best_x);
        Ok(best_x)
    }
}

// ---------------------------------------------------------------------------
// Random search
// ---------------------------------------------------------------------------

/// Default number of candidates for [`RandomSearch`].
const DEFAULT_N_CANDIDATES: usize = 1000;

/// Scores uniformly drawn candidates and keeps the best one.
///
/// Much cheaper than [`DifferentialEvolution`] and adequate in one or two
/// dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomSearch {
    n_candidates: usize,
}

impl RandomSearch {
    /// Creates a random search over `n_candidates` points (at least one).
    #[must_use]
    pub fn new(n_candidates: usize) -> Self {
        Self {
            n_candidates: n_candidates.max(1),
        }
    }

    /// Number of candidates scored per call.
    #[must_use]
    pub fn n_candidates(&self) -> usize {
        self.n_candidates
    }
}

impl Default for RandomSearch {
    fn default() -> Self {
        Self::new(DEFAULT_N_CANDIDATES)
    }
}

impl AcquisitionMaximizer for RandomSearch {
    fn maximize(
        &self,
        acquisition: &dyn AcquisitionFunction,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Result<Vec<f64>> {
        let mut best_score = f64::NEG_INFINITY;
        let mut best_x: Vec<f64> = bounds.iter().map(|b| b.low).collect();

        for _ in 0..self.n_candidates {
            let x = rng_util::uniform_point(rng, bounds);
            let score = acquisition.score(&x)?;
            if score > best_score {
                best_score = score;
                best_x = x;
            }
        }

        bounds.clip(&mut best_x);
        Ok(best_x)
    }
}
