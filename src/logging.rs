//! Logging utilities for impactkit.
//!
//! Thin wrappers over `tracing` used by the CLI and the workbook reader, so
//! that palette lookups and table conversions share field names
//! (`operation`, `run_id`, `elapsed_ms`) in the log output.

use std::time::Instant;

use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::error::ImpactError;

/// Install the stderr subscriber. `RUST_LOG` wins over `level` when set.
///
/// Calling this more than once keeps the first subscriber.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

/// Mark the beginning of a CLI-level operation
pub fn log_operation_start(operation: &str, subject: Option<&str>) {
    match subject {
        Some(subject) => info!(operation, subject, "begin"),
        None => info!(operation, "begin"),
    }
}

/// Mark the end of an operation started with [`log_operation_start`]
pub fn log_operation_end(operation: &str, started: Instant, ok: bool) {
    let elapsed_ms = elapsed_ms(started);
    if ok {
        info!(operation, elapsed_ms, "done");
    } else {
        warn!(operation, elapsed_ms, "failed");
    }
}

/// Run `f`, logging its duration under a fresh run id
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let run_id = generate_run_id();
    let started = Instant::now();
    debug!(operation, run_id = %run_id, "begin");

    let out = f();

    info!(operation, run_id = %run_id, elapsed_ms = elapsed_ms(started), "done");
    out
}

/// Summarize a freshly parsed station table
pub fn log_table_stats(source: &str, rows: usize, channels: &[String], layout: &str) {
    info!(
        operation = "read_workbook",
        source,
        rows,
        layout,
        channels = %channels.join(","),
        "station table loaded"
    );
}

/// Record a library error together with where it surfaced
pub fn log_error(err: &ImpactError, context: &str) {
    error!(error = %err, context, "operation error");
}

/// Random id correlating the log lines of one run
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}
