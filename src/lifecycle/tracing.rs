/// Initializes the tracing/logging infrastructure for the application.
///
/// Structured logging via the `tracing` crate with environment-based
/// filtering: set `RUST_LOG` to control verbosity, e.g.
/// `RUST_LOG=pokedex_sync=debug` to see store traffic.
///
/// Call once at process start; the store and clients emit spans and events
/// unconditionally and stay silent without a subscriber.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
