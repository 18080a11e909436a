use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::evolution::reporting::{GenerationStats, Reporter};
use crate::evolution::{GenomeId, Optimizer};
use crate::network::FeedForwardNetwork;
use super::config::NeatConfig;
use super::genome::Genome;

/// The population of the bundled engine.
pub struct Population {
    config: NeatConfig,
    genomes: Vec<(GenomeId, Genome)>,
    generation: usize,
    next_key: GenomeId,
    best: Option<Genome>,
    rng: ChaCha8Rng,
}

impl Population {
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn genomes(&self) -> &[(GenomeId, Genome)] {
        &self.genomes
    }

    /// Best genome seen so far in any evaluated generation.
    pub fn best(&self) -> Option<&Genome> {
        self.best.as_ref()
    }

    fn next_key(&mut self) -> GenomeId {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    /// Collects fitness values after evaluation. Every genome must have one.
    fn summarize(&self, elapsed_ms: u64) -> Result<GenerationStats> {
        let mut fitnesses = Vec::with_capacity(self.genomes.len());
        let mut best: Option<(GenomeId, f64)> = None;
        for (id, genome) in &self.genomes {
            let f = genome.fitness.ok_or(Error::MissingFitness(*id))?;
            fitnesses.push(f);
            if best.map_or(true, |(_, b)| f > b) {
                best = Some((*id, f));
            }
        }
        let best = best.ok_or(Error::NoGenerations)?;
        Ok(GenerationStats::from_fitnesses(self.generation, &fitnesses, best, elapsed_ms))
    }

    fn remember_best(&mut self, best_id: GenomeId) {
        let Some((_, candidate)) = self.genomes.iter().find(|(id, _)| *id == best_id) else {
            return;
        };
        let better = match &self.best {
            Some(current) => candidate.fitness > current.fitness,
            None => true,
        };
        if better {
            self.best = Some(candidate.clone());
        }
    }

    /// Replaces the evaluated generation with the next one: elites carried
    /// over unchanged, the rest bred from the top `survival_threshold`
    /// fraction.
    fn reproduce(&mut self) {
        let mut ranked: Vec<Genome> = std::mem::take(&mut self.genomes)
            .into_iter()
            .map(|(_, g)| g)
            .collect();
        ranked.sort_by(|a, b| {
            let fa = a.fitness.unwrap_or(f64::NEG_INFINITY);
            let fb = b.fitness.unwrap_or(f64::NEG_INFINITY);
            fb.total_cmp(&fa)
        });

        let size = self.config.pop_size;
        let cutoff = ((self.config.survival_threshold * ranked.len() as f64).ceil() as usize)
            .max(2)
            .min(ranked.len());
        let parents = &ranked[..cutoff];

        let mut next: Vec<(GenomeId, Genome)> = Vec::with_capacity(size);
        for elite in ranked.iter().take(self.config.elitism.min(size)) {
            let mut g = elite.clone();
            g.fitness = None;
            next.push((g.key, g));
        }

        while next.len() < size {
            let key = self.next_key();
            let a = &parents[self.rng.gen_range(0..parents.len())];
            let mut child = if self.rng.gen::<f64>() < self.config.crossover_rate {
                let b = &parents[self.rng.gen_range(0..parents.len())];
                Genome::crossover(key, a, b, &mut self.rng)
            } else {
                let mut c = a.clone();
                c.key = key;
                c
            };
            child.mutate(&self.config, &mut self.rng);
            next.push((key, child));
        }

        self.genomes = next;
    }
}

impl Optimizer for Population {
    type Config = NeatConfig;
    type Genome = Genome;
    type Network = FeedForwardNetwork;

    fn from_config(config: NeatConfig) -> Result<Population> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let genomes = (0..config.pop_size)
            .map(|key| (key, Genome::minimal(key, &config, &mut rng)))
            .collect();
        Ok(Population {
            next_key: config.pop_size,
            config,
            genomes,
            generation: 0,
            best: None,
            rng,
        })
    }

    fn build_network(genome: &Genome, config: &NeatConfig) -> Result<FeedForwardNetwork> {
        FeedForwardNetwork::create(genome, config)
    }

    fn run<F>(
        &mut self,
        mut evaluate: F,
        max_generations: usize,
        reporter: &mut dyn Reporter,
    ) -> Result<Genome>
    where
        F: FnMut(&mut [(GenomeId, Genome)], &NeatConfig) -> Result<()>,
    {
        for _ in 0..max_generations {
            reporter.start_generation(self.generation);

            let t_start = Instant::now();
            evaluate(&mut self.genomes, &self.config)?;
            let stats = self.summarize(t_start.elapsed().as_millis() as u64)?;

            self.remember_best(stats.best_genome);
            reporter.post_evaluate(&stats);

            if !self.config.no_fitness_termination && stats.best_fitness >= self.config.fitness_threshold {
                reporter.found_solution(self.generation, stats.best_fitness);
                break;
            }

            self.reproduce();
            debug!(
                generation = self.generation,
                size = self.genomes.len(),
                "bred next generation"
            );
            reporter.end_generation(&stats);
            self.generation += 1;
        }

        self.best.clone().ok_or(Error::NoGenerations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::reporting::StatisticsReporter;
    use crate::evolution::Individual;

    fn seeded(pop_size: usize) -> NeatConfig {
        NeatConfig { seed: Some(11), ..NeatConfig::default().with_pop_size(pop_size) }
    }

    /// Rewards genomes whose first output-layer bias is close to 1.
    fn toy_fitness(genomes: &mut [(GenomeId, Genome)], _: &NeatConfig) -> Result<()> {
        for (_, g) in genomes.iter_mut() {
            let b = g.layers.last().map_or(0.0, |l| l.biases[0]);
            g.set_fitness(-(b - 1.0).abs());
        }
        Ok(())
    }

    #[test]
    fn builds_configured_population() {
        let pop = Population::from_config(seeded(12)).unwrap();
        assert_eq!(pop.genomes().len(), 12);
        assert_eq!(pop.generation(), 0);
        assert!(pop.best().is_none());
    }

    #[test]
    fn runs_all_generations_and_keeps_size() {
        let cfg = NeatConfig { no_fitness_termination: true, ..seeded(10) };
        let mut pop = Population::from_config(cfg).unwrap();
        let mut stats = StatisticsReporter::new();
        let best = pop.run(toy_fitness, 5, &mut stats).unwrap();

        assert_eq!(stats.generations(), 5);
        assert_eq!(pop.genomes().len(), 10);
        let best_seen = stats.best_fitness_curve().into_iter().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(best.fitness, Some(best_seen));
    }

    #[test]
    fn stops_once_threshold_is_reached() {
        let cfg = NeatConfig { fitness_threshold: -10.0, ..seeded(6) };
        let mut pop = Population::from_config(cfg).unwrap();
        let mut stats = StatisticsReporter::new();
        pop.run(toy_fitness, 50, &mut stats).unwrap();
        assert_eq!(stats.generations(), 1);
    }

    #[test]
    fn missing_fitness_aborts() {
        let mut pop = Population::from_config(seeded(4)).unwrap();
        let mut stats = StatisticsReporter::new();
        let result = pop.run(|_, _| Ok(()), 3, &mut stats);
        assert!(matches!(result, Err(Error::MissingFitness(_))));
    }

    #[test]
    fn evaluation_error_propagates() {
        let mut pop = Population::from_config(seeded(4)).unwrap();
        let mut stats = StatisticsReporter::new();
        let result = pop.run(|_, _| Err(Error::InputSize { expected: 4, got: 0 }), 3, &mut stats);
        assert!(matches!(result, Err(Error::InputSize { .. })));
        assert_eq!(stats.generations(), 0);
    }

    #[test]
    fn zero_generations_has_no_best() {
        let mut pop = Population::from_config(seeded(4)).unwrap();
        let mut stats = StatisticsReporter::new();
        assert!(matches!(pop.run(toy_fitness, 0, &mut stats), Err(Error::NoGenerations)));
    }

    #[test]
    fn same_seed_same_run() {
        let cfg = NeatConfig { no_fitness_termination: true, ..seeded(8) };
        let mut a = Population::from_config(cfg.clone()).unwrap();
        let mut b = Population::from_config(cfg).unwrap();
        let mut ra = StatisticsReporter::new();
        let mut rb = StatisticsReporter::new();
        let ga = a.run(toy_fitness, 4, &mut ra).unwrap();
        let gb = b.run(toy_fitness, 4, &mut rb).unwrap();
        assert_eq!(ga, gb);
        assert_eq!(ra.best_fitness_curve(), rb.best_fitness_curve());
    }
}
