use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is unset: quiet except for warnings.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` (e.g. `RUST_LOG=surgery_progress_report=debug`) and writes to
/// stderr so that JSON on stdout stays machine-readable. Calling it twice is a no-op.
pub fn init() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  let _ = fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(true)
    .with_line_number(true)
    .try_init();
}
