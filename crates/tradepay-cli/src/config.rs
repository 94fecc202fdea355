//! Settings loading
//!
//! Defaults, then the optional config file, then `TRADEPAY_*` environment
//! variables.

use std::path::Path;

use anyhow::Result;
use config::{Config, ConfigError, File};
use tradepay::Settings;

use crate::env_vars::FromEnv;

/// Config file looked up in the working dir
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load settings from `config_file` and the environment.
///
/// A missing config file is not an error; an unreadable or malformed one is
/// logged and the defaults are used instead. So are settings that fail
/// [`Settings::validate`].
pub fn load_settings(config_file: &Path) -> Result<Settings> {
    let default_settings = Settings::default();

    let from_file = match from_file(&default_settings, config_file) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(
                "Error reading config file {}, falling back to defaults. Error: {err}",
                config_file.display()
            );
            default_settings
        }
    };

    let settings = valid_or_default(from_file.from_env()?);
    tracing::debug!(
        "Fee bounds {} - {}, send rate {}, request rate {}",
        settings.fees.min_fee,
        settings.fees.max_fee,
        settings.rates.send,
        settings.rates.request
    );

    Ok(settings)
}

fn valid_or_default(settings: Settings) -> Settings {
    match settings.validate() {
        Ok(()) => settings,
        Err(err) => {
            tracing::error!("Invalid settings, falling back to defaults. Error: {err}");
            Settings::default()
        }
    }
}

fn from_file(default: &Settings, config_file: &Path) -> Result<Settings, ConfigError> {
    let config = Config::builder()
        // use defaults
        .add_source(Config::try_from(default)?)
        // override with file contents
        .add_source(File::from(config_file).required(false))
        .build()?;

    config.try_deserialize()
}
