pub mod app;
pub mod env;
pub mod error;
pub mod loader;
pub mod preflight;
pub mod runner;
pub mod server;
pub mod settings;

pub use app::{AgentConfig, ModelConfig};
pub use env::{EnvSource, ProcessEnv};
pub use error::{ConfigError, PreflightError};
pub use loader::{load_env_file, load_settings};
pub use preflight::{Preflight, model_preflight, preflight};
pub use runner::{ExecutableLookup, PathLookup, Platform, resolve_executable};
pub use server::ServerConfig;
pub use settings::{AgentSettings, ServerSettings};
