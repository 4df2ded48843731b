// rtbuf-request: send one request to a buffer server and print the response
use clap::Parser;
use rtbuf_client::{BufferClient, ClientConfig, Command, Message};
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rtbuf-request")]
#[command(about = "Send a single request to a real-time buffer server", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Buffer server host
    #[arg(short = 'a', long, env = "RTBUF_HOST")]
    host: Option<String>,

    /// Buffer server port
    #[arg(short, long, env = "RTBUF_PORT")]
    port: Option<u16>,

    /// Connect through a Unix socket instead of TCP (host and port are ignored)
    #[arg(short, long, value_name = "PATH")]
    unix: Option<String>,

    /// Command name (e.g. GET_HDR) or numeric code (e.g. 0x0201)
    #[arg(short, long, default_value = "GET_HDR", value_parser = parse_command)]
    command: Command,

    /// Request payload as hex
    #[arg(long, value_name = "HEX", default_value = "", value_parser = parse_payload)]
    payload: HexBytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HexBytes(Vec<u8>);

fn parse_command(s: &str) -> Result<Command, String> {
    if let Some(cmd) = Command::from_name(s) {
        return Ok(cmd);
    }
    let code = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    code.map(Command).map_err(|_| format!("unknown command: {}", s))
}

fn parse_payload(s: &str) -> Result<HexBytes, String> {
    hex::decode(s)
        .map(HexBytes)
        .map_err(|e| format!("invalid hex payload: {}", e))
}

fn run(cli: Cli) -> rtbuf_client::Result<Message> {
    let mut client = match cli.unix {
        Some(ref path) => BufferClient::connect_unix(path)?,
        None => {
            let mut config = ClientConfig::from_env()?;
            if let Some(host) = cli.host {
                config.host = host;
            }
            if let Some(port) = cli.port {
                config.port = port;
            }
            BufferClient::from_config(&config)?
        }
    };

    let response = client.call(cli.command, cli.payload.0)?;
    client.disconnect()?;
    Ok(response)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sent = cli.command;

    match run(cli) {
        Ok(response) => {
            let now = chrono::Local::now().format("%Y/%m/%d %H:%M:%S%.6f");
            println!(
                "{} {} -> {} bufsize={} [{}]",
                now,
                sent,
                response.command(),
                response.bufsize(),
                hex::encode(response.payload())
            );
        }
        Err(e) => {
            error!("{} request failed: {}", sent, e);
            eprintln!("rtbuf-request: {}", e);
            process::exit(1);
        }
    }
}
