//! Configuration module
//!
//! Request defaults (model, response format, encoder settings) and a registry
//! of named structured-output schemas, loaded from YAML or JSON files.

mod env;
mod error;
mod schema;
mod validator;

pub use env::interpolate_env_vars;
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{GenwireConfig, CONFIG_VERSION};
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<GenwireConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    let config: GenwireConfig =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    finish_load(path, config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<GenwireConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    let config: GenwireConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    finish_load(path, config)
}

/// Read the file and interpolate environment variables before parsing
fn read_config(path: &Path) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    interpolate_env_vars(&content)
}

fn finish_load(path: &Path, config: GenwireConfig) -> ConfigResult<GenwireConfig> {
    ConfigValidator::new().validate(&config)?;
    debug!(
        path = %path.display(),
        model = %config.model,
        schemas = config.schemas.len(),
        "loaded configuration"
    );
    Ok(config)
}
