//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → RotatingFile
//! ```
//!
//! Each span batch is written as one OTLP/JSON line to
//! `/data/moviesearch-otlp.json`. The file rotates at 10 MB and keeps three
//! backups. The filter level comes from the `trace_level` plugin option
//! (default `info`).
//!
//! - [`init`]: Subscriber setup
//! - [`export`]: OTLP/JSON span exporter and tracer provider
//! - [`rotating`]: Size-bounded file writer

mod export;
mod init;
mod rotating;

pub use init::{init_tracing, TRACE_FILE_NAME};
