//! A terminal client for a remote poker server.
//!
//! The client creates or joins a table over HTTP, follows it over a
//! WebSocket, and takes betting commands from stdin.

use anyhow::{Context, Result};
use ctrlc::set_handler;
use env_logger::Env;
use pico_args::Arguments;
use std::io::{self, IsTerminal};
use tokio::io::BufReader;

use rp_client::{
    app,
    config::{ClientConfig, ConfigOverrides},
    render::Renderer,
};

const HELP: &str = "\
Play at a remote poker server from the terminal

USAGE:
  rp_client [OPTIONS]

OPTIONS:
  --server URL          Server URL  [default: env POKER_SERVER_URL or http://localhost:8000]
  --name NAME           Player name  [default: env POKER_PLAYER_NAME or your login name]
  --table ID            Table to join  [default: env POKER_TABLE_ID, or create a new table]
  --small-blind N       Small blind for a new table  [default: 5]
  --max-players N       Seats for a new table  [default: 6]

FLAGS:
  --list                Print the server's tables and exit
  --no-ws               Don't subscribe to live updates
  --no-color            Disable coloured output (also honours NO_COLOR)
  -h, --help            Print help information

COMMANDS (once seated):
  fold, check, call, bet N, raise N, allin, state, tables, help, quit
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = ConfigOverrides {
        server_url: pargs.opt_value_from_str("--server")?,
        player_name: pargs.opt_value_from_str("--name")?,
        table_id: pargs.opt_value_from_str("--table")?,
        small_blind: pargs.opt_value_from_str("--small-blind")?,
        max_players: pargs.opt_value_from_str("--max-players")?,
        no_color: pargs.contains("--no-color"),
        no_websocket: pargs.contains("--no-ws"),
        list_only: pargs.contains("--list"),
    };

    let unused = pargs.finish();
    if !unused.is_empty() {
        anyhow::bail!("Unexpected arguments: {unused:?}");
    }

    let config = ClientConfig::from_env(overrides).context("Invalid configuration")?;
    let renderer = Renderer::new(config.color);

    set_handler(move || {
        println!();
        println!("{}", renderer.info("Goodbye!"));
        std::process::exit(0);
    })
    .context("Failed to install Ctrl-C handler")?;

    let stdout = io::stdout();
    let clear_screen = stdout.is_terminal();
    let input = BufReader::new(tokio::io::stdin());

    if let Err(e) = app::run(config, input, stdout, clear_screen).await {
        eprintln!("{}", renderer.error(format!("{e:#}")));
        std::process::exit(1);
    }

    Ok(())
}
