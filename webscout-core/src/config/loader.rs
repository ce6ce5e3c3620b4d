use super::error::ConfigError;
use super::settings::{AgentSettings, RawSettings};
use crate::constants::{ENV_PATH, SETTINGS_PATH};
use dotenvy::from_filename;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Loads `KEY=value` pairs from `path` into the process environment.
///
/// Variables that are already set are left untouched. A missing file is not
/// an error; returns whether a file was loaded.
pub fn load_env_file(path: Option<&Path>) -> Result<bool, ConfigError> {
    let env_path = path.unwrap_or_else(|| Path::new(ENV_PATH));
    match from_filename(env_path) {
        Ok(loaded) => {
            debug!(path = %loaded.display(), "Loaded credentials file");
            Ok(true)
        }
        Err(err) if err.not_found() => {
            debug!(path = %env_path.display(), "No credentials file found");
            Ok(false)
        }
        Err(source) => Err(ConfigError::EnvFile {
            path: env_path.to_path_buf(),
            source,
        }),
    }
}

/// Load and validate settings.
///
/// An explicit `path` must exist; the default path is optional and falls back
/// to built-in defaults when absent.
pub fn load_settings(path: Option<&Path>) -> Result<AgentSettings, ConfigError> {
    match path {
        Some(path) => read_settings(path),
        None => {
            let default_path = Path::new(SETTINGS_PATH);
            match read_settings(default_path) {
                Err(ConfigError::NotFound { .. }) => {
                    debug!(path = SETTINGS_PATH, "Settings file absent, using defaults");
                    Ok(AgentSettings::default())
                }
                other => other,
            }
        }
    }
}

fn read_settings(path: &Path) -> Result<AgentSettings, ConfigError> {
    debug!(path = %path.display(), "Reading agent settings file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: RawSettings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    parsed.validate()
}
