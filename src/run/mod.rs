pub mod harness;
pub mod run_config;

pub use harness::{RunHarness, RunState};
pub use run_config::RunConfig;
