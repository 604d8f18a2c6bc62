//! LLM Gateway binary.

use clap::{Parser, Subcommand};
use llm_gateway::config::Config;
use llm_gateway::core::dispatcher::Dispatcher;
use llm_gateway::core::registry::ModelRegistry;
use llm_gateway::core::types::{ChatMessage, ChatRequest, ProbeStatus};
use llm_gateway::utils::{error::Result, logging};
use llm_gateway::Gateway;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

/// Unified gateway for heterogeneous chat-completion providers.
#[derive(Parser)]
#[command(name = "gateway", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "config/gateway.yaml", env = "GATEWAY_CONFIG")]
    config: String,

    /// Verbose logging.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default).
    Serve {
        /// Override the configured bind host.
        #[arg(long)]
        host: Option<String>,

        /// Override the configured bind port.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Send one message to a model and print the reply.
    Chat {
        #[arg(long)]
        model: String,

        #[arg(long, default_value = "Hello")]
        message: String,
    },

    /// Probe every enabled model and report availability.
    Test,

    /// Print the configured models.
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_file(&cli.config).await?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            info!(
                providers = config.providers().filter(|p| p.enabled).count(),
                "Starting gateway"
            );
            Gateway::new(config)?.run().await
        }

        Command::Chat { model, message } => {
            let dispatcher = dispatcher_for(&config)?;
            let request = ChatRequest::new(model, vec![ChatMessage::user(message)]);
            let response = dispatcher.complete(&request).await?;

            match response["choices"][0]["message"]["content"].as_str() {
                Some(content) => println!("{}", content),
                None => println!("{}", serde_json::to_string_pretty(&response)?),
            }
            Ok(())
        }

        Command::Test => {
            let dispatcher = dispatcher_for(&config)?;
            for provider in dispatcher.registry().list_enabled().to_vec() {
                let report = dispatcher.test(&provider.name, None).await;
                match report.status {
                    ProbeStatus::Available => println!(
                        "{}: available ({}s)",
                        provider.name,
                        report.elapsed_seconds.unwrap_or_default()
                    ),
                    ProbeStatus::Unavailable => println!(
                        "{}: unavailable - {}",
                        provider.name,
                        report.error.unwrap_or_else(|| "unknown error".to_string())
                    ),
                }
            }
            Ok(())
        }

        Command::List => {
            for provider in config.providers() {
                println!(
                    "{}  type={}  enabled={}  max_tokens={}  base_url={}",
                    provider.name,
                    provider.provider_type,
                    provider.enabled,
                    provider.max_tokens,
                    provider.base_url
                );
            }
            Ok(())
        }
    }
}

fn dispatcher_for(config: &Config) -> Result<Dispatcher> {
    let registry = Arc::new(ModelRegistry::from_config(config));
    Dispatcher::new(registry)
}
