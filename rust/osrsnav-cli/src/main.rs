use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use osrsnav_client::{ClientConfig, NavClient};
use osrsnav_core::{snapshot, Coordinate, RecordedSession};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "osrsnav", version, about = "Query the osrs-nav path service")]
struct Args {
    /// Service base URL (defaults to OSRSNAV_URL, then http://localhost:8000)
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// Request timeout in milliseconds (defaults to OSRSNAV_TIMEOUT_MS, then none)
    #[arg(long = "timeout-ms", global = true, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Human readable logs instead of JSON
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Request a route and print it as JSON
    Path {
        #[arg(long, value_name = "X,Y,PLANE")]
        start: Coordinate,
        #[arg(long, value_name = "X,Y,PLANE")]
        end: Coordinate,
        /// Recorded session JSON used to build the game state
        #[arg(long, value_name = "PATH")]
        session: Option<PathBuf>,
    },
    /// Print the server's data selection
    Select,
    /// Print the game state a path request would carry
    Snapshot {
        #[arg(long, value_name = "PATH")]
        session: PathBuf,
    },
}

fn load_session(path: &Path) -> Result<RecordedSession> {
    let file = File::open(path).with_context(|| format!("opening session {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing session {}", path.display()))
}

fn client_config(args: &Args) -> ClientConfig {
    let mut cfg = ClientConfig::from_env();
    if let Some(url) = &args.url {
        cfg.base_url = url.clone();
    }
    if args.timeout_ms.is_some() {
        cfg.timeout_ms = args.timeout_ms;
    }
    cfg
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if args.pretty {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).json().init();
    }

    let cfg = client_config(&args);
    info!(core_version=%osrsnav_core::version(), url=%cfg.base_url, "starting osrsnav");
    let client = NavClient::new(cfg).context("building http client")?;

    match args.command {
        Command::Path { start, end, session } => {
            let session = match session {
                Some(path) => load_session(&path)?,
                None => RecordedSession::default(),
            };
            match client.build_between(start, end, &session).await {
                Some(route) => println!("{}", serde_json::to_string_pretty(&route)?),
                None => anyhow::bail!("no route from {start} to {end}"),
            }
        }
        Command::Select => {
            let selection = client.try_fetch_selection().await.context("fetching selection")?;
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }
        Command::Snapshot { session } => {
            let session = load_session(&session)?;
            let selection = client.get_selection().await;
            let state = snapshot(&session, selection.as_deref());
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }
    Ok(())
}
