/// iris-neat viewer
///
/// Browses saved genome artifacts and replays each one against the dataset
/// it was trained on. Served by a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin viewer --release
/// Then open http://127.0.0.1:5000

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tiny_http::Server;
use tracing::{error, info};

use state::ViewerState;

#[derive(Parser)]
#[command(name = "viewer")]
#[command(about = "Browse saved iris-neat genomes in the browser")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    addr: String,

    /// Directory containing saved artifacts
    #[arg(long, default_value = "genomes")]
    artifacts_dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = iris_neat::logging::init_tracing() {
        eprintln!("{}", e);
    }

    let server = match Server::http(&cli.addr) {
        Ok(server) => server,
        Err(e) => {
            error!(addr = %cli.addr, error = %e, "failed to bind HTTP server");
            return ExitCode::FAILURE;
        }
    };

    let shared_state = Arc::new(ViewerState::new(&cli.artifacts_dir));

    info!(
        addr = %cli.addr,
        artifacts_dir = %cli.artifacts_dir.display(),
        "viewer listening, open http://{}",
        cli.addr
    );

    // One thread per request; a slow replay must not stall the index page.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }

    ExitCode::SUCCESS
}
