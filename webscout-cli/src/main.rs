mod app;
mod cli;
mod signals;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    app::run(Cli::parse()).await
}
