//! Subscriber setup.
//!
//! Installs a global subscriber built from:
//! 1. An `EnvFilter` from `RUST_LOG`, else `config.trace_level`, else `info`
//! 2. An OpenTelemetry layer exporting spans to a rotating OTLP JSON file
//! 3. Optionally, a human-readable `fmt` layer on stderr

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default trace file name inside the data directory.
const TRACE_FILE_NAME: &str = "movieshelf-otlp.json";

/// Resolves where spans are written: `config.trace_file`, or the default file
/// in the platform data directory.
#[must_use]
pub fn trace_file_path(config: &Config) -> PathBuf {
    config.trace_file.as_ref().map_or_else(
        || crate::infrastructure::get_data_dir().join(TRACE_FILE_NAME),
        crate::infrastructure::expand_tilde,
    )
}

/// Initializes tracing for the process.
///
/// If the trace file's directory cannot be created, the file layer is skipped
/// and only the stderr layer (when enabled) is installed. Calling this more
/// than once has no effect after the first successful call.
///
/// # Example
///
/// ```rust
/// use movieshelf::observability::init_tracing;
/// use movieshelf::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     trace_file: Some(std::env::temp_dir().join("movieshelf-doc-otlp.json")),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let trace_file = trace_file_path(config);
    let dir_ready = trace_file
        .parent()
        .map_or(true, |dir| dir.as_os_str().is_empty() || std::fs::create_dir_all(dir).is_ok());

    let otel_layer = dir_ready.then(|| {
        let resource = Resource::new(vec![
            KeyValue::new("service.name", "movieshelf"),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]);
        let provider = tracer::create_tracer_provider(trace_file.clone(), resource);
        OpenTelemetryLayer::new(provider.tracer(tracer::SCOPE))
    });

    let stderr_layer = config
        .log_to_stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(trace_file = %trace_file.display(), file_export = dir_ready, "tracing initialized");
    }
}
