use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter directives are read from this variable, e.g. `LUNIK_LOG=lunik=debug`.
pub const LOG_ENV: &str = "LUNIK_LOG";

/// Install a stderr subscriber. Stdout belongs to the dispatched tool.
pub fn init(default_level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
