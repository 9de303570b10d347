use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to built-in defaults when [`init_config`] has not run yet.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads `path` when given, otherwise `pocketlink.toml` in the current
/// directory if present; environment variables override both. Calling it
/// again replaces the loaded configuration.
pub fn init_config(path: Option<&str>) -> Arc<StaticConfig> {
    let loaded = StaticConfig::load(path);
    match CONFIG.get() {
        Some(current) => current.store(Arc::new(loaded)),
        None => {
            CONFIG.get_or_init(|| ArcSwap::from_pointee(loaded));
        }
    }
    get_config()
}
