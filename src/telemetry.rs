/// Initializes structured logging for the binary.
///
/// Verbosity follows `RUST_LOG` (e.g. `RUST_LOG=tuckshop=debug`) and defaults
/// to warnings only. Logs go to stderr so stdout stays parseable.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
