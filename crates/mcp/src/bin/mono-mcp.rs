// Mono banking MCP server binary

use anyhow::Result;
use clap::{Parser, ValueEnum};
use mono_mcp::{transport, McpConfig, McpServer};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Newline-delimited JSON-RPC over stdin/stdout
    Stdio,
    /// Streamable HTTP on /mcp
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "mono-mcp")]
#[command(version, about = "MCP server for the Mono open banking API", long_about = None)]
struct Args {
    /// Transport to serve on
    #[arg(value_enum, default_value_t = Mode::Stdio)]
    mode: Mode,

    /// Port for the HTTP transport (overrides the config file)
    port: Option<u16>,

    /// Path to configuration file
    #[arg(short, long, env = "MONO_MCP_CONFIG", default_value = "mono-mcp.toml")]
    config: PathBuf,

    /// Mono secret key
    #[arg(long, env = "MONO_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Override the Mono API host
    #[arg(long, env = "MONO_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout belongs to the protocol in stdio mode, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mono_mcp=info,mono_sdk=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    install_panic_hook();

    let args = Args::parse();

    let Some(secret_key) = args.secret_key.filter(|key| !key.trim().is_empty()) else {
        eprintln!("Error: MONO_SECRET_KEY environment variable is required");
        std::process::exit(1);
    };

    let mut config = McpConfig::load(&args.config)?.with_base_url(args.base_url);
    if let Some(port) = args.port {
        config.http.port = port;
    }

    let client = Arc::new(config.build_client(&secret_key)?);
    tracing::info!("Mono API at {}", client.config().base_url);

    let server = Arc::new(McpServer::with_banking_tools(client)?);

    match args.mode {
        Mode::Stdio => transport::stdio::run(server).await?,
        Mode::Http => transport::http::serve(server, &config.http).await?,
    }

    Ok(())
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("Panic: {}", info);
        default_hook(info);
        // Handler panics become a 500 response; anywhere else is fatal
        if !transport::http::in_request_scope() {
            std::process::exit(1);
        }
    }));
}
