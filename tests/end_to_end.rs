use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use iris_neat::evolution::reporting::Reporter;
use iris_neat::{
    Activate, ArtifactStore, Dataset, Error, GenerationStats, GenomeArtifact, GenomeId, Individual,
    NeatArtifact, NeatConfig, Optimizer, Population, Record, ResultViewer, Result, RunConfig,
    RunHarness, RunState, Species, StatisticsReporter,
};

fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

// ---------------------------------------------------------------------------
// A trivial optimizer whose genomes apply a fixed rule instead of a network
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum Rule {
    /// Output the input unchanged.
    Echo,
    /// Output three zeros.
    Zeros,
    /// Classify by petal length (third column).
    Petal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct EchoGenome {
    rule: Rule,
    fitness: Option<f64>,
}

impl Individual for EchoGenome {
    fn fitness(&self) -> Option<f64> {
        self.fitness
    }
    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

struct EchoNetwork {
    rule: Rule,
}

impl Activate for EchoNetwork {
    fn activate(&self, input: &[f64]) -> Result<Vec<f64>> {
        match self.rule {
            Rule::Echo => Ok(input.to_vec()),
            Rule::Zeros => Ok(vec![0.0; 3]),
            Rule::Petal => {
                let petal_length = *input.get(2).ok_or(Error::InputSize { expected: 4, got: input.len() })?;
                let species = if petal_length < 2.5 {
                    Species::Setosa
                } else if petal_length < 4.95 {
                    Species::Versicolor
                } else {
                    Species::Virginica
                };
                Ok(species.one_hot())
            }
        }
    }
}

struct EchoPool {
    genomes: Vec<(GenomeId, EchoGenome)>,
    config: (),
}

impl Optimizer for EchoPool {
    type Config = ();
    type Genome = EchoGenome;
    type Network = EchoNetwork;

    fn from_config(_: ()) -> Result<Self> {
        let genomes = vec![
            (0, EchoGenome { rule: Rule::Zeros, fitness: None }),
            (1, EchoGenome { rule: Rule::Echo, fitness: None }),
        ];
        Ok(EchoPool { genomes, config: () })
    }

    fn build_network(genome: &EchoGenome, _: &()) -> Result<EchoNetwork> {
        Ok(EchoNetwork { rule: genome.rule })
    }

    fn run<F>(&mut self, mut evaluate: F, max_generations: usize, reporter: &mut dyn Reporter) -> Result<EchoGenome>
    where
        F: FnMut(&mut [(GenomeId, EchoGenome)], &()) -> Result<()>,
    {
        let mut best = None;
        for generation in 0..max_generations {
            reporter.start_generation(generation);
            evaluate(&mut self.genomes, &self.config)?;
            let fitnesses: Vec<f64> = self.genomes.iter().filter_map(|(_, g)| g.fitness).collect();
            let (id, top) = self
                .genomes
                .iter()
                .max_by(|a, b| a.1.fitness.unwrap_or(f64::MIN).total_cmp(&b.1.fitness.unwrap_or(f64::MIN)))
                .ok_or(Error::NoGenerations)?;
            let stats = GenerationStats::from_fitnesses(generation, &fitnesses, (*id, top.fitness.unwrap_or(0.0)), 0);
            reporter.post_evaluate(&stats);
            best = Some(top.clone());
            reporter.end_generation(&stats);
        }
        best.ok_or(Error::NoGenerations)
    }
}

/// Records whose measurements are their own one-hot species vector, so an
/// echoing network is exactly right.
fn one_hot_dataset() -> Dataset {
    Dataset::from_records("one-hot", vec![
        Record::new(vec![1.0, 0.0, 0.0], "setosa"),
        Record::new(vec![0.0, 1.0, 0.0], "versicolor"),
        Record::new(vec![0.0, 0.0, 1.0], "virginica"),
    ])
}

const SYNTHETIC_CSV: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
6.3,3.3,6.0,2.5,virginica
";

/// Writes the three-row headered CSV, loads it and saves it with `rule`.
fn save_synthetic(dir: &std::path::Path, name: &str, rule: Rule) -> ArtifactStore {
    let csv_path = dir.join("synthetic.csv");
    std::fs::write(&csv_path, SYNTHETIC_CSV).unwrap();
    let dataset = Dataset::load(&csv_path).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.input_size(), 4);

    let store = ArtifactStore::new(dir.join("genomes"));
    store.save(name, &GenomeArtifact::new(EchoGenome { rule, fitness: Some(9.0) }, (), dataset)).unwrap();
    store
}

#[test]
fn headered_csv_with_exact_genome_is_fully_correct() {
    let dir = tempfile::tempdir().unwrap();
    let store = save_synthetic(dir.path(), "petal_1", Rule::Petal);

    let report = ResultViewer::<EchoPool>::new(store).inspect("petal_1").unwrap();
    assert_eq!(report.inspection.total, 3);
    assert_eq!(report.inspection.correct, 3);
    let predicted: Vec<_> = report.inspection.results.iter().map(|r| r.predicted_species).collect();
    assert_eq!(predicted, vec![Some(Species::Setosa), Some(Species::Versicolor), Some(Species::Virginica)]);
}

#[test]
fn headered_csv_with_zero_genome_is_never_correct() {
    let dir = tempfile::tempdir().unwrap();
    let store = save_synthetic(dir.path(), "zeros_1", Rule::Zeros);

    let report = ResultViewer::<EchoPool>::new(store).inspect("zeros_1").unwrap();
    assert_eq!(report.inspection.total, 3);
    assert_eq!(report.inspection.correct, 0);
}

#[test]
fn echo_genome_is_fully_correct_when_replayed() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let artifact = GenomeArtifact::new(EchoGenome { rule: Rule::Echo, fitness: Some(9.0) }, (), one_hot_dataset());
    store.save("echo_1", &artifact).unwrap();

    let viewer = ResultViewer::<EchoPool>::new(store);
    let report = viewer.inspect("echo_1").unwrap();
    assert_eq!(report.inspection.total, 3);
    assert_eq!(report.inspection.correct, 3);
    assert_eq!(report.fitness, Some(9.0));
    assert_eq!(report.source, "one-hot");
    assert!(report.inspection.results.iter().all(|r| r.expected_species == r.predicted_species));
}

#[test]
fn zero_output_genome_is_never_correct() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let artifact = GenomeArtifact::new(EchoGenome { rule: Rule::Zeros, fitness: Some(6.0) }, (), one_hot_dataset());
    store.save("zeros_1", &artifact).unwrap();

    let report = ResultViewer::<EchoPool>::new(store).inspect("zeros_1").unwrap();
    assert_eq!(report.inspection.total, 3);
    assert_eq!(report.inspection.correct, 0);
    assert!(report.inspection.results.iter().all(|r| r.predicted_species.is_none()));
}

#[test]
fn listing_skips_hidden_files_and_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let artifact = GenomeArtifact::new(EchoGenome { rule: Rule::Echo, fitness: None }, (), one_hot_dataset());
    store.save("b_run", &artifact).unwrap();
    store.save("a_run", &artifact).unwrap();
    std::fs::write(dir.path().join(".DS_Store"), b"junk").unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();

    let viewer = ResultViewer::<EchoPool>::new(store);
    assert_eq!(viewer.list_artifacts().unwrap(), vec!["a_run".to_owned(), "b_run".to_owned()]);
}

#[test]
fn missing_and_corrupt_artifacts_are_distinguished() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken"), b"{ not json").unwrap();
    let viewer = ResultViewer::<EchoPool>::new(ArtifactStore::new(dir.path()));

    assert!(matches!(viewer.inspect("nope"), Err(Error::ArtifactNotFound(_))));
    assert!(matches!(viewer.inspect("broken"), Err(Error::Json(_))));
    assert!(matches!(viewer.inspect("../escape"), Err(Error::InvalidArtifactName(_))));
}

#[test]
fn harness_result_round_trips_through_the_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = RunHarness::<EchoPool>::new(one_hot_dataset(), (), RunConfig::new(2));
    let mut stats = StatisticsReporter::new();
    let best = harness.run(&mut stats).unwrap();

    // baseline 3 records x 3 outputs; the echo genome has zero error
    assert_eq!(best, EchoGenome { rule: Rule::Echo, fitness: Some(9.0) });
    assert_eq!(stats.generations(), 2);
    assert!(matches!(harness.state(), RunState::Complete { generations: 2, .. }));

    let store = ArtifactStore::new(dir.path());
    store
        .save("g_2_p_2_0", &GenomeArtifact::new(best.clone(), (), harness.dataset().clone()))
        .unwrap();
    let loaded = ResultViewer::<EchoPool>::new(store).load("g_2_p_2_0").unwrap();
    assert_eq!(loaded.genome, best);
    assert_eq!(&loaded.dataset, harness.dataset());
}

// ---------------------------------------------------------------------------
// The bundled engine on the shipped data
// ---------------------------------------------------------------------------

#[test]
fn shipped_config_matches_defaults() {
    let config = NeatConfig::load_json(manifest_path("config/neat.json")).unwrap();
    assert_eq!(config, NeatConfig::default());
}

#[test]
fn shipped_dataset_has_fifty_of_each_species() {
    let dataset = Dataset::load(manifest_path("data/iris.csv")).unwrap();
    assert_eq!(dataset.len(), 150);
    assert_eq!(dataset.input_size(), 4);
    for species in Species::ALL {
        let count = dataset.records().iter().filter(|r| r.species() == Some(species)).count();
        assert_eq!(count, 50, "{}", species);
    }
}

#[test]
fn short_neat_run_saves_a_replayable_artifact() {
    let dataset = Dataset::load(manifest_path("data/iris.csv")).unwrap();
    let mut config = NeatConfig::default().with_pop_size(12);
    config.seed = Some(7);

    let run_config = RunConfig { parallel: true, ..RunConfig::new(3) };
    let mut harness = RunHarness::<Population>::new(dataset, config, run_config);
    let mut stats = StatisticsReporter::new();
    let best = harness.run(&mut stats).unwrap();

    let fitness = best.fitness.unwrap();
    assert!(fitness <= 450.0);
    assert!(stats.generations() >= 1 && stats.generations() <= 3);

    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let artifact: NeatArtifact = GenomeArtifact::new(best, harness.config().clone(), harness.dataset().clone());
    store.save("g_3_p_12_0", &artifact).unwrap();

    let report = ResultViewer::<Population>::new(store).inspect("g_3_p_12_0").unwrap();
    assert_eq!(report.inspection.total, 150);
    assert_eq!(report.fitness, Some(fitness));

    // The replay sees the same error the evaluator scored.
    let total_error: f64 = report
        .inspection
        .results
        .iter()
        .flat_map(|r| r.expected.iter().zip(&r.actual).map(|(e, a)| (e - a).abs()))
        .sum();
    assert!((450.0 - total_error - fitness).abs() < 1e-6, "{} vs {}", 450.0 - total_error, fitness);
}
