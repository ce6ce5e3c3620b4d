use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading the credentials file or loading and
/// validating the settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse credentials file {path:?}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("settings file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read settings from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Every problem found before any child process or network session exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightError {
    problems: Vec<String>,
}

impl PreflightError {
    pub fn new(problems: Vec<String>) -> Self {
        Self { problems }
    }

    pub fn problems(&self) -> &[String] {
        &self.problems
    }
}

impl std::error::Error for PreflightError {}

impl fmt::Display for PreflightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preflight failed:")?;
        for problem in &self.problems {
            write!(f, "\n - {problem}")?;
        }
        Ok(())
    }
}
