use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use webscout_core::constants::{DEFAULT_HTTP_ADDR, ENV_PATH};

#[derive(Parser, Debug)]
#[command(
    name = "webscout",
    version,
    about = "Web research agent driving the Firecrawl MCP tools"
)]
pub struct Cli {
    /// Interactive shell or stateless HTTP endpoint
    #[arg(long, value_enum, default_value_t = RunMode::Repl)]
    pub mode: RunMode,

    /// Credentials file; variables already set in the environment win
    #[arg(long, default_value = ENV_PATH)]
    pub env_file: PathBuf,

    /// Agent settings file (TOML); defaults to config/agent.toml when present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listen address for serve mode
    #[arg(long, default_value = DEFAULT_HTTP_ADDR)]
    pub addr: SocketAddr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    Repl,
    Serve,
}
