use std::path::PathBuf;

use clap::Parser;
use soundbridge_server::ServerConfig;
use tracing_subscriber::EnvFilter;

/// Single-group audio relay: streams stored sounds to every connected
/// WebSocket listener, including live telephony call legs.
#[derive(Debug, Parser)]
#[command(name = "soundbridge", version, about)]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Host:port advertised in the NCCO document (defaults to host:port).
    #[arg(long)]
    public_host: Option<String>,

    /// Caller id for the outbound leg; empty means withheld.
    #[arg(long, default_value = "")]
    cli: String,

    /// Directory holding the WAV sound library.
    #[arg(long, default_value = "audio")]
    audio_dir: PathBuf,

    /// Outbound queue depth per connection.
    #[arg(long, default_value_t = 256)]
    queue: usize,

    /// Let a streamer hear its own broadcast.
    #[arg(long)]
    echo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let public_host = args
        .public_host
        .unwrap_or_else(|| format!("{}:{}", args.host, args.port));

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        public_host,
        cli: args.cli,
        audio_dir: args.audio_dir,
        max_send_queue: args.queue,
        echo_to_origin: args.echo,
    };

    tracing::info!(audio_dir = %config.audio_dir.display(), "starting soundbridge");
    let handle = soundbridge_server::start(config).await?;
    tracing::info!(port = handle.port, "soundbridge ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}
