//! Evolves an Iris classifier and saves the winning genome as an artifact.
//!
//! Run with:
//!   cargo run --release -- --max-generations 300 --population-size 150
//! Then inspect the result with `cargo run --bin viewer`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use iris_neat::inspect::evaluate_records;
use iris_neat::store::{custom_artifact_name, default_artifact_name, unix_timestamp};
use iris_neat::{
    ArtifactStore, Dataset, FeedForwardNetwork, NeatArtifact, NeatConfig, Population,
    ProgressReporter, ReporterSet, Result, RunConfig, RunHarness, StatisticsReporter,
};

#[derive(Parser)]
#[command(name = "iris-neat")]
#[command(version)]
#[command(about = "Evolve a feed-forward network that classifies Iris flowers")]
struct Cli {
    /// Maximum number of generations to process
    #[arg(short = 'g', long, value_parser = clap::value_parser!(u64).range(1..))]
    max_generations: u64,

    /// Population size
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u64).range(1..))]
    population_size: u64,

    /// Custom artifact name; a timestamp is appended
    #[arg(short, long)]
    name: Option<String>,

    /// Engine configuration (JSON)
    #[arg(long, default_value = "config/neat.json")]
    config: PathBuf,

    /// Training data (CSV with header)
    #[arg(long, default_value = "data/iris.csv")]
    dataset: PathBuf,

    /// Directory the artifact is written to
    #[arg(long, default_value = "genomes")]
    artifacts_dir: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate each generation's genomes in parallel
    #[arg(long)]
    parallel: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = iris_neat::logging::init_tracing() {
        eprintln!("{}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let max_generations = cli.max_generations as usize;
    let population_size = cli.population_size as usize;

    let timestamp = unix_timestamp();
    let name = match &cli.name {
        Some(custom) => custom_artifact_name(custom, timestamp),
        None => default_artifact_name(max_generations, population_size, timestamp),
    };
    ArtifactStore::validate_name(&name)?;

    let mut config = NeatConfig::load_json(&cli.config)?.with_pop_size(population_size);
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let dataset = Dataset::load(&cli.dataset)?;

    let run_config = RunConfig { parallel: cli.parallel, ..RunConfig::new(max_generations) };
    let mut harness = RunHarness::<Population>::new(dataset, config, run_config);

    println!(
        "Finding a best neural network genome using {} generations of {} specimen with the NEAT algorithm...",
        max_generations, population_size
    );

    let mut progress = ProgressReporter;
    let mut statistics = StatisticsReporter::new();
    let genome = {
        let mut reporters = ReporterSet::new();
        reporters.add(&mut progress);
        reporters.add(&mut statistics);
        harness.run(&mut reporters)?
    };

    println!(
        "Found genome with fitness {} after {} generation(s) in {:.1}s",
        genome.fitness.unwrap_or(f64::NAN),
        statistics.generations(),
        statistics.total_elapsed_ms() as f64 / 1000.0
    );
    println!("Hidden layers: {:?}", genome.hidden_sizes());

    let network = FeedForwardNetwork::create(&genome, harness.config())?;
    let inspection = evaluate_records(harness.dataset(), &network)?;
    println!(
        "Correct on training data: {}/{} ({:.1}%)",
        inspection.correct,
        inspection.total,
        inspection.accuracy() * 100.0
    );

    let store = ArtifactStore::new(&cli.artifacts_dir);
    let artifact = NeatArtifact::new(genome, harness.config().clone(), harness.dataset().clone());
    let path = store.save(&name, &artifact)?;
    println!("Saved genome to {}", path.display());

    Ok(())
}
