use tracing_subscriber::EnvFilter;

// Filter variable for diagnostics; e.g. `ALARM_LOG=debug`.
const LOG_ENV: &str = "ALARM_LOG";

// Diagnostics go to stderr and default to warnings only, so the bar on stdout stays readable.
pub fn init() -> Result<(), String> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| err.to_string())
}
