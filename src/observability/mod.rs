//! Tracing with file-based OpenTelemetry export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → OTLP JSON lines
//! ```
//!
//! - **Location**: `<data dir>/movieshelf/movieshelf-otlp.json` unless
//!   `trace_file` is configured
//! - **Rotation**: 10 MB per file, 3 backups
//! - **Level**: `RUST_LOG`, then `trace_level`, then `info`
//!
//! Store operations run inside `debug_span!`s named after the operation
//! (`catalog.fetch_all`, `auth.login`, ...). Tokens are never recorded.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - `tracer`: tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating line writer

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, trace_file_path};
