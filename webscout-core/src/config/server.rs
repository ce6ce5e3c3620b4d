use super::settings::ServerSettings;
use crate::constants::TOOL_SERVER_KEY_VAR;
use std::collections::HashMap;
use std::path::PathBuf;

/// Everything needed to launch the MCP tool server as a child process.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub name: String,
    pub command: PathBuf,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub workdir: Option<PathBuf>,
}

impl ServerConfig {
    /// `<runner> <runner_args…> <package>` with the tool-server key in the child environment.
    pub fn tool_server(runner: PathBuf, settings: &ServerSettings, api_key: &str) -> Self {
        let mut args = settings.runner_args.clone();
        args.push(settings.package.clone());
        Self {
            name: settings.package.clone(),
            command: runner,
            args,
            env: HashMap::from([(TOOL_SERVER_KEY_VAR.to_string(), api_key.to_string())]),
            workdir: None,
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_keys: Vec<&String> = self.env.keys().collect();
        f.debug_struct("ServerConfig")
            .field("name", &self.name)
            .field("command", &self.command)
            .field("args", &self.args)
            .field("env", &env_keys)
            .field("workdir", &self.workdir)
            .finish()
    }
}
