//! An automated player for a remote poker server.
//!
//! The bot takes a seat at the given table, or the first table with room,
//! and plays until the server stops answering.

use anyhow::{Context, Error};
use ctrlc::set_handler;
use env_logger::Env;
use log::{error, info};
use pico_args::Arguments;
use remote_poker::{
    ApiClient,
    bot::{BotDecisionMaker, BotRunner, RunnerConfig, find_open_table},
};

const HELP: &str = "\
Run a poker bot against a remote poker server

USAGE:
  rp_bots [OPTIONS]

OPTIONS:
  --server URL          Server URL  [default: env POKER_SERVER_URL or http://localhost:8000]
  --name NAME           Bot name  [default: Bot<random number>]
  --table ID            Table to join  [default: first table with an open seat]

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  RUST_LOG              Log filter  [default: info]
";

const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
const NEW_TABLE_SEATS: usize = 6;
const NEW_TABLE_SMALL_BLIND: u64 = 5;

struct Args {
    server_url: String,
    name: String,
    table_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server_url: pargs.opt_value_from_str("--server")?.unwrap_or_else(|| {
            std::env::var("POKER_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string())
        }),
        name: pargs
            .opt_value_from_str("--name")?
            .unwrap_or_else(|| format!("Bot{}", rand::random_range(1..1000))),
        table_id: pargs.opt_value_from_str("--table")?,
    };

    set_handler(|| {
        info!("Bot interrupted, leaving");
        std::process::exit(0);
    })
    .context("Failed to install Ctrl-C handler")?;

    let mut client = ApiClient::new(args.server_url);

    let table_id = match args.table_id {
        Some(id) => id,
        None => find_open_table(&client, NEW_TABLE_SEATS, NEW_TABLE_SMALL_BLIND)
            .await
            .context("Failed to find a table")?,
    };

    let joined = match client.join_table(&table_id, &args.name, true).await {
        Ok(joined) => joined,
        Err(e) => {
            error!("{} could not join table {table_id}: {e}", args.name);
            std::process::exit(1);
        }
    };
    info!(
        "{} joined table {table_id} as player {}",
        args.name, joined.player_id
    );

    let mut runner = BotRunner::new(
        client,
        joined.player_id,
        args.name.clone(),
        BotDecisionMaker::new(),
        RunnerConfig::default(),
    );
    let report = runner.run().await;

    info!(
        "{} finished after {} actions ({} consecutive errors)",
        args.name, report.actions_taken, report.consecutive_errors
    );
    Ok(())
}
