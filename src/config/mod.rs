//! Configuration management for the refresh client.
//!
//! Configuration is read from the `"modhead"` key of a settings document,
//! merged with defaults, validated, and kept in a process-wide singleton that
//! [`crate::executor::RefreshClient::from_global_config`] reads.

pub mod schema;

pub use schema::RefreshClientConfig;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Key under which refresh settings live in a settings document.
pub const SETTINGS_KEY: &str = "modhead";

/// Global configuration instance.
///
/// This is lazily initialized on first access and can be updated when settings change.
static CONFIG: Lazy<RwLock<RefreshClientConfig>> =
    Lazy::new(|| RwLock::new(RefreshClientConfig::default()));

/// Loads configuration from a settings document.
///
/// Settings that fail to parse are reported and replaced by defaults; settings
/// that parse but fail validation are rejected and the global configuration
/// is left as it was.
///
/// # Example
///
/// ```no_run
/// use modhead_refresh::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "modhead": {
///         "timeout": 10000,
///         "validateSsl": false
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, Some(10000));
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<RefreshClientConfig, String> {
    let mut config = RefreshClientConfig::default();

    if let Some(section) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<RefreshClientConfig>(section.clone()) {
            Ok(user_config) => config = user_config,
            Err(e) => {
                log::warn!(
                    "Failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_KEY,
                    e
                );
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns the defaults if nothing has been loaded yet.
pub fn get_config() -> RefreshClientConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| RefreshClientConfig::default())
}

/// Updates the global configuration in place.
///
/// If the update leaves the configuration invalid it is reset to defaults.
///
/// # Example
///
/// ```no_run
/// use modhead_refresh::config::update_config;
///
/// update_config(|config| {
///     config.timeout = Some(15000);
/// });
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut RefreshClientConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = RefreshClientConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = RefreshClientConfig::default();
    }
}
