use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber, writing to stdout.
///
/// `RUST_LOG` controls the filter (default `info`). `LOG_FORMAT=json` switches
/// to one JSON object per line; anything else gives compact human-readable
/// lines.
///
/// Returns an error string if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = std::env::var("LOG_FORMAT").unwrap_or_default();

    let result = match format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_env_filter(filter)
            .try_init(),
    };

    result.map_err(|e| format!("tracing init failed: {e}"))
}
