/// Initialize structured logging with tracing.
/// `RUST_LOG` wins over the configured level. Calling this more than once is harmless.
pub fn init_logging(level: &str) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .json() // JSON output for structured logging
        )
        .try_init();

    if installed.is_ok() {
        tracing::debug!(level = level, "Structured logging initialized");
    }
}
