use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Log lines go to stderr so the run report on
/// stdout stays clean.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `verbose`. Calling this twice keeps the first subscriber.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
