//! OpenTelemetry tracing with file-based OTLP export.
//!
//! `tracing` spans are bridged into OpenTelemetry by `tracing-opentelemetry`
//! and exported synchronously as OTLP JSON lines:
//!
//! ```text
//! tracing → OpenTelemetryLayer → TracerProvider → FileSpanExporter → coursedesk-otlp.json
//! ```
//!
//! The trace file lives in the data directory unless `trace_file` is set,
//! and is rolled over at 10 MB with three generations kept.
//!
//! # Level Resolution
//!
//! 1. `RUST_LOG`, if set and valid
//! 2. `Config::trace_level`
//! 3. `"info"`

mod export;
mod otlp;

pub use export::{file_tracer_provider, FileSpanExporter, RotatingFile};

use std::path::PathBuf;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::error::{ConsoleError, Result};
use crate::infrastructure::paths;
use crate::Config;

/// Service name reported in the OTLP resource.
pub const SERVICE_NAME: &str = "coursedesk";

/// Default trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "coursedesk-otlp.json";

/// Resolves where spans are written for `config`.
#[must_use]
pub fn trace_file_path(config: &Config) -> PathBuf {
    config.trace_file.as_deref().map_or_else(
        || paths::data_dir(config).join(TRACE_FILE_NAME),
        |file| PathBuf::from(paths::expand_tilde(file)),
    )
}

/// Installs the global tracing subscriber.
///
/// Only the first call in a process takes effect; later calls return `Ok`.
///
/// # Errors
///
/// Returns an error if the trace file's directory cannot be created.
pub fn init_tracing(config: &Config) -> Result<()> {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let trace_file = trace_file_path(config);
    if let Some(parent) = trace_file.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConsoleError::Config(format!("cannot create {}: {e}", parent.display())))?;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = file_tracer_provider(trace_file, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    if tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
