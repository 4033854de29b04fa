use clap::Parser;
use docket_core::config::Config;
use std::path::PathBuf;

const DEFAULT_FILTER: &str = "docket=info,docket_server=info,docket_render=info,docket_core=info";

#[derive(Parser)]
#[command(name = "docket", about = "Docket: legal document template server")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/docket/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Listen address, overriding [server].host.
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overriding [server].port and $PORT.
    #[arg(long)]
    port: Option<u16>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { DEFAULT_FILTER };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    docket_server::run(config).await
}
