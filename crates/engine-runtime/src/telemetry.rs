use engine_config::settings::loader::ConfigSource;
use model::execution::keys;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The `log_level` configured for an instance, or `info`.
pub fn level_from_config(config: &impl ConfigSource) -> String {
    let level = config.value(keys::LOG_LEVEL).trim().to_lowercase();
    if level.is_empty() {
        DEFAULT_LOG_LEVEL.to_string()
    } else {
        level
    }
}

/// `RUST_LOG` wins over `level`; an unparsable level falls back to `info`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global fmt subscriber. Returns false when a subscriber was
/// already installed, so repeated calls are harmless.
pub fn init_tracing(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(true)
        .try_init()
        .is_ok()
}
