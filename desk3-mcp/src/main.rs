use desk3_mcp::{api, config, stdio};
use desk3_mcp::mcp::Dispatcher;
use std::sync::Arc;
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, error};
use std::process;

/// MCP server for the Desk3 market-data API
#[derive(Parser)]
#[command(name = "desk3-mcp", version, about)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve MCP over stdin/stdout (default)
    Stdio,
    /// Serve MCP over HTTP server-sent events
    Sse {
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration; the log level comes from it when available
    let loaded = config::load_config(cli.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|s| s.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(level));

    info!("Starting desk3-mcp server version {}", desk3_mcp::VERSION);

    let settings = match loaded {
        Ok(settings) => {
            info!("Loaded configuration successfully");
            settings
        },
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let dispatcher = match Dispatcher::from_settings(&settings) {
        Ok(dispatcher) => Arc::new(dispatcher),
        Err(e) => {
            error!("Failed to initialize dispatcher: {}", e);
            process::exit(1);
        }
    };
    info!("Initialized tool registry with {} tools", dispatcher.tool_count());

    match cli.command.unwrap_or(Command::Stdio) {
        Command::Stdio => {
            if let Err(e) = stdio::run(dispatcher).await {
                error!("Error serving MCP on stdio: {}", e);
                process::exit(1);
            }
        },
        Command::Sse { host, port } => {
            let mut settings = (*settings).clone();
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            if let Err(e) = api::init_server(Arc::new(settings), dispatcher).await {
                error!("Error starting desk3-mcp server: {}", e);
                process::exit(1);
            }
        }
    }

    info!("desk3-mcp server stopped gracefully");
    Ok(())
}
