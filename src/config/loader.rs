//! Configuration loading from and saving to disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::validate_config;

/// Error type for configuration loading and saving.
///
/// Bad tracker entries are not errors; they are coerced while parsing.
/// Only an unreadable or structurally broken document fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Render error: {0}")]
    TomlRender(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON has no NaN or infinity; serde_json would write `null` and the
    /// file would no longer load.
    #[error("{field} is {value}, which JSON cannot represent")]
    NonFinite { field: String, value: f32 },
}

/// On-disk format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON; everything else is treated as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

pub fn parse_config(text: &str, format: ConfigFormat) -> Result<ServerConfig, ConfigError> {
    let config = match format {
        ConfigFormat::Toml => toml::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
    };
    Ok(config)
}

pub fn render_config(config: &ServerConfig, format: ConfigFormat) -> Result<String, ConfigError> {
    let text = match format {
        ConfigFormat::Toml => toml::to_string(config)?,
        ConfigFormat::Json => {
            ensure_finite(config)?;
            serde_json::to_string_pretty(config)?
        }
    };
    Ok(text)
}

/// Every float in `config` that would not survive a JSON round trip is an error.
fn ensure_finite(config: &ServerConfig) -> Result<(), ConfigError> {
    let bridge_fields = config.bridges.iter().map(|(name, bridge)| {
        (
            format!("bridges.{}.footTrackerAnkleToToeRatio", name),
            bridge.foot_tracker_ankle_to_toe_ratio,
        )
    });
    let filters = &config.filters;
    let filter_fields = [
        ("filters.amount", filters.amount),
        ("filters.smoothMin", filters.smooth_min),
        ("filters.predictMin", filters.predict_min),
        ("filters.predictMultiplier", filters.predict_multiplier),
    ]
    .into_iter()
    .map(|(field, value)| (field.to_string(), value));

    match bridge_fields.chain(filter_fields).find(|(_, value)| !value.is_finite()) {
        Some((field, value)) => Err(ConfigError::NonFinite { field, value }),
        None => Ok(()),
    }
}

/// Load a configuration file and log any validation warnings.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, ConfigFormat::from_path(path))?;

    for warning in validate_config(&config) {
        tracing::warn!(path = ?path, "{}", warning);
    }

    tracing::debug!(path = ?path, bridges = config.bridges.len(), "Configuration loaded");
    Ok(config)
}

pub fn save_config(path: &Path, config: &ServerConfig) -> Result<(), ConfigError> {
    let text = render_config(config, ConfigFormat::from_path(path))?;
    fs::write(path, text)?;

    tracing::debug!(path = ?path, "Configuration saved");
    Ok(())
}
