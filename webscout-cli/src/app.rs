use crate::cli::{Cli, RunMode};
use crate::signals::{Shutdown, ShutdownSignals};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use webscout_core::config::{
    AgentSettings, PathLookup, Platform, ProcessEnv, ServerConfig, load_env_file, load_settings,
    model_preflight, preflight,
};
use webscout_core::model::OpenAIClient;
use webscout_core::repl::{self, ReplError, ReplExit};
use webscout_core::server;
use webscout_core::tooling::{McpSession, SessionTimeouts};
use webscout_core::{Agent, AgentOptions};

pub async fn run(cli: Cli) -> ExitCode {
    init_tracing(cli.mode);
    let env_loaded = match load_env_file(Some(&cli.env_file)) {
        Ok(loaded) => loaded,
        Err(err) => {
            warn!(error = %err, "Credentials file ignored");
            println!("Warning: {err}");
            false
        }
    };
    debug!(
        mode = ?cli.mode,
        env_file = %cli.env_file.display(),
        env_loaded,
        config = ?cli.config,
        "CLI arguments parsed"
    );

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            println!("FATAL: {err}");
            return ExitCode::FAILURE;
        }
    };

    match cli.mode {
        RunMode::Repl => run_repl(settings).await,
        RunMode::Serve => run_server(settings, cli.addr).await,
    }
}

async fn run_repl(settings: AgentSettings) -> ExitCode {
    let mut signals = match ShutdownSignals::install() {
        Ok(signals) => signals,
        Err(err) => {
            println!("FATAL: cannot install signal handlers: {err}");
            return ExitCode::FAILURE;
        }
    };

    let checked = match preflight(
        &ProcessEnv,
        &settings.server.runner,
        Platform::current(),
        &PathLookup,
    ) {
        Ok(checked) => checked,
        Err(report) => {
            println!("{report}");
            return ExitCode::FAILURE;
        }
    };

    let model = match OpenAIClient::from_config(&checked.config.model_config(), settings.request_timeout) {
        Ok(model) => model,
        Err(err) => {
            println!("FATAL: {err}");
            return ExitCode::FAILURE;
        }
    };

    let launch = ServerConfig::tool_server(
        checked.tool_runner.clone(),
        &settings.server,
        &checked.config.tool_server_key,
    );
    info!(server = ?launch, "Starting tool server");
    let timeouts = SessionTimeouts {
        handshake: settings.handshake_timeout,
        tool_call: settings.tool_timeout,
    };
    let session = match McpSession::connect(&launch, timeouts).await {
        Ok(session) => session,
        Err(err) => {
            println!("FATAL: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut agent = Agent::new(model, session, AgentOptions::from_settings(&settings));
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    let outcome = tokio::select! {
        result = repl::run(&mut agent, input, &mut output) => Ok(result),
        signal = signals.recv() => Err(signal),
    };

    agent.tool_server().shutdown().await;

    match outcome {
        Ok(Ok(exit)) => {
            info!(?exit, "Shell finished");
            if exit == ReplExit::EndOfInput {
                println!();
            }
            ExitCode::SUCCESS
        }
        Ok(Err(ReplError::SessionLost { reason })) => {
            error!(%reason, "Session ended by tool server loss");
            ExitCode::FAILURE
        }
        Ok(Err(err)) => {
            println!("FATAL: {err}");
            ExitCode::FAILURE
        }
        Err(Shutdown::Interrupt) => {
            println!("\nGoodbye!");
            ExitCode::SUCCESS
        }
        Err(signal) => {
            info!(?signal, "Stopped by signal");
            ExitCode::SUCCESS
        }
    }
}

async fn run_server(settings: AgentSettings, addr: SocketAddr) -> ExitCode {
    let mut signals = match ShutdownSignals::install() {
        Ok(signals) => signals,
        Err(err) => {
            println!("FATAL: cannot install signal handlers: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = match model_preflight(&ProcessEnv) {
        Ok(config) => config,
        Err(report) => {
            println!("{report}");
            return ExitCode::FAILURE;
        }
    };
    let provider = match OpenAIClient::from_config(&config, settings.request_timeout) {
        Ok(provider) => provider,
        Err(err) => {
            println!("FATAL: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, model = provider.model(), "Starting companion HTTP endpoint");
    tokio::select! {
        result = server::serve(Arc::new(provider), addr) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!(error = %err, "HTTP server stopped");
                println!("FATAL: {err}");
                ExitCode::FAILURE
            }
        },
        signal = signals.recv() => {
            info!(?signal, "Shutting down HTTP endpoint");
            ExitCode::SUCCESS
        }
    }
}

fn init_tracing(mode: RunMode) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let default = match mode {
            RunMode::Repl => "warn",
            RunMode::Serve => "info",
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
