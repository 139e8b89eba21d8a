//! Docassemble MCP server.
//!
//! Exposes the Docassemble REST API as MCP tools over stdio. Connection
//! settings come from `DOCASSEMBLE_BASE_URL` and `DOCASSEMBLE_API_KEY`, read
//! from the environment or a `.env` file.

mod handlers;
mod protocol;
mod server;
mod tools;
mod wrapper;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docassemble_core::{ClientConfig, DocassembleClient, DocassembleError, EnvVars};
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "docassemble-mcp")]
#[command(version, about = "MCP server for the Docassemble REST API")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log line format (logs always go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server on stdin/stdout (default)
    Serve,
    /// Check the base URL and API key against the server
    TestConnection {
        /// Server URL, overrides DOCASSEMBLE_BASE_URL
        #[arg(long)]
        base_url: Option<String>,
        /// API key, overrides DOCASSEMBLE_API_KEY
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Print the tool registry as JSON
    ListTools,
    /// Print the detected server version and feature support
    VersionInfo,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn init_logging(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries protocol frames only
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    match format {
        LogFormat::Text => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::TestConnection { base_url, api_key } => test_connection(base_url, api_key).await,
        Command::ListTools => {
            let tools = tools::tool_registry();
            println!("{}", serde_json::to_string_pretty(&tools)?);
            Ok(())
        }
        Command::VersionInfo => {
            let config = ClientConfig::from_env().context("Failed to load configuration")?;
            let client = DocassembleClient::connect(config).await?;
            println!("{}", serde_json::to_string_pretty(&client.version_info())?);
            Ok(())
        }
    }
}

async fn serve() -> Result<()> {
    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    info!("Starting Docassemble MCP server for {}", config.base_url);

    let client = DocassembleClient::connect(config).await?;
    info!(
        "Connected to Docassemble {}",
        client.da_version().unwrap_or("(version unknown)")
    );

    server::run_stdio(server::AppState { client }).await
}

async fn test_connection(base_url: Option<String>, api_key: Option<String>) -> Result<()> {
    let config = ClientConfig::from_lookup(|key| {
        let flag = if key == EnvVars::BASE_URL {
            base_url.clone()
        } else if key == EnvVars::API_KEY {
            api_key.clone()
        } else {
            None
        };
        flag.or_else(|| std::env::var(key).ok())
    })
    .context("Failed to load configuration")?;

    println!("Testing connection to {}", config.base_url);
    let client = DocassembleClient::new(config)?;

    match client.get_current_user().await {
        Ok(user) => {
            println!("Connection successful");
            println!("  E-mail:     {}", field(&user, "email"));
            println!("  User id:    {}", field(&user, "id"));
            println!("  Privileges: {}", field(&user, "privileges"));
            Ok(())
        }
        Err(e) => {
            error!("Connection failed: {}", e);
            println!("Connection failed: {}", e);
            if let Some(status) = e.status_code() {
                println!("  Status code: {}", status);
            }
            for hint in hints(&e) {
                println!("  - {}", hint);
            }
            std::process::exit(1);
        }
    }
}

fn field(user: &Value, key: &str) -> String {
    match user.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Null) | None => "(none)".to_string(),
        Some(other) => other.to_string(),
    }
}

fn hints(err: &DocassembleError) -> Vec<&'static str> {
    match err.status_code() {
        Some(401 | 403) => vec![
            "Check that the API key is correct and has not been deleted",
            "Check that the key's IP or referer restrictions allow this machine",
        ],
        Some(404) => vec!["Check the base URL; it should be the server root, without /api"],
        Some(_) => vec!["Check the server logs for details"],
        None => vec![
            "Check that the base URL is reachable from this machine",
            "Check that the server is running",
        ],
    }
}
