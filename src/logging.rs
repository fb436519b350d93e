use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RINGSH_LOG";

/// Diagnostics go to stderr and stay at `warn` unless `RINGSH_LOG` asks for
/// more, so they never mix into prompts or command output.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be set when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
