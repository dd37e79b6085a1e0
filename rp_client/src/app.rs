//! The interactive command loop.
//!
//! Seats the player, subscribes to push events, then reads commands line
//! by line and prints whatever the server answers. Nothing is retried;
//! errors are shown and the loop carries on.

use anyhow::{Context, Result};
use log::{debug, info};
use remote_poker::{ApiClient, ServerEvent, Session, entities::TableState};
use std::io::Write;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};

use crate::{
    commands::{Command, parse_command},
    config::ClientConfig,
    render::{CLEAR_SCREEN, Renderer},
};

const PROMPT: &str = "> ";

enum Flow {
    Continue,
    Quit,
}

/// A seated player at the terminal.
struct App<W> {
    client: ApiClient,
    renderer: Renderer,
    out: W,
    player_id: String,
    clear_screen: bool,
}

/// Run the client against `config`, reading commands from `input` and
/// printing to `out`.
///
/// `clear_screen` redraws the table on a blank terminal; leave it off when
/// `out` isn't a terminal.
pub async fn run<R, W>(
    config: ClientConfig,
    input: R,
    mut out: W,
    clear_screen: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let renderer = Renderer::new(config.color);
    let mut client = ApiClient::new(config.server_url.clone());

    writeln!(out, "{}\n", renderer.banner())?;

    if config.list_only {
        let tables = client.list_tables().await.context("Failed to list tables")?;
        writeln!(out, "{}", renderer.tables(&tables))?;
        return Ok(());
    }

    let table_id = match config.table_id.clone() {
        Some(id) => id,
        None => {
            writeln!(out, "{}", renderer.info("Creating new table..."))?;
            let created = client
                .create_table(config.max_players, config.small_blind)
                .await
                .context("Failed to create table")?;
            writeln!(
                out,
                "{}",
                renderer.success(format!("Created table: {}", created.table_id))
            )?;
            created.table_id
        }
    };

    writeln!(
        out,
        "{}",
        renderer.info(format!(
            "Joining table {table_id} as {}...",
            config.player_name
        ))
    )?;
    let joined = client
        .join_table(&table_id, &config.player_name, false)
        .await
        .context("Failed to join table")?;
    info!("Seated at {table_id} as {}", joined.player_id);
    writeln!(
        out,
        "{}",
        renderer.success(format!("Joined table! Your ID: {}", joined.player_id))
    )?;

    let (session, events) = if config.websocket {
        subscribe(&client, &renderer, &mut out).await?
    } else {
        (None, None)
    };

    let mut app = App {
        client,
        renderer,
        out,
        player_id: joined.player_id,
        clear_screen,
    };
    app.show_state(&joined.table_state)?;
    app.print(app.renderer.help())?;

    let result = app.command_loop(input, events).await;

    if let Some(session) = session {
        session.close().await;
    }
    result
}

/// Open the push subscription. A failure is reported and the client
/// carries on without live updates.
async fn subscribe<W: Write>(
    client: &ApiClient,
    renderer: &Renderer,
    out: &mut W,
) -> Result<(Option<Session>, Option<mpsc::UnboundedReceiver<ServerEvent>>)> {
    let (tx, rx) = mpsc::unbounded_channel();

    let connected = match client.websocket_url() {
        Ok(url) => {
            Session::connect(&url, move |event| {
                // Receiver gone means the loop has ended
                let _ = tx.send(event);
            })
            .await
        }
        Err(e) => Err(e),
    };

    match connected {
        Ok(session) => {
            writeln!(out, "{}", renderer.success("WebSocket connected"))?;
            Ok((Some(session), Some(rx)))
        }
        Err(e) => {
            writeln!(
                out,
                "{}",
                renderer.error(format!("WebSocket connection failed: {e}"))
            )?;
            writeln!(
                out,
                "{}",
                renderer.info("Continuing without WebSocket (polling mode)")
            )?;
            Ok((None, None))
        }
    }
}

impl<W: Write> App<W> {
    async fn command_loop<R>(
        &mut self,
        input: R,
        mut events: Option<mpsc::UnboundedReceiver<ServerEvent>>,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.prompt()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        break;
                    };
                    if let Flow::Quit = self.handle_line(&line).await? {
                        break;
                    }
                    self.prompt()?;
                }
                event = next_event(&mut events) => {
                    match event {
                        Some(event) => self.show_event(&event)?,
                        None => {
                            events = None;
                            let notice = "Live updates stopped; use 'state' to refresh";
                            self.print(self.renderer.info(notice))?;
                        }
                    }
                    self.prompt()?;
                }
            }
        }

        self.print(self.renderer.info("Goodbye!"))
    }

    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                self.print(self.renderer.error(e))?;
                return Ok(Flow::Continue);
            }
        };
        debug!("Command: {command:?}");

        match command {
            Command::Act(action, amount) => {
                match self.client.perform_action(action, amount).await {
                    Ok(state) => self.show_state(&state)?,
                    Err(e) => self.print(self.renderer.error(e))?,
                }
            }
            Command::State => match self.client.table_state().await {
                Ok(state) => self.show_state(&state)?,
                Err(e) => self.print(self.renderer.error(e))?,
            },
            Command::Tables => match self.client.list_tables().await {
                Ok(tables) => self.print(self.renderer.tables(&tables))?,
                Err(e) => self.print(self.renderer.error(e))?,
            },
            Command::Help => self.print(self.renderer.help())?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn show_state(&mut self, state: &TableState) -> Result<()> {
        if self.clear_screen {
            write!(self.out, "{CLEAR_SCREEN}")?;
            writeln!(self.out, "{}\n", self.renderer.banner())?;
        }
        let view = self.renderer.table_state(state, &self.player_id);
        self.print(view)
    }

    /// Push events carry the public view, so they are announced rather
    /// than redrawn over the player's own cards.
    fn show_event(&mut self, event: &ServerEvent) -> Result<()> {
        writeln!(self.out)?;
        self.print(self.renderer.notice(event.summary()))?;
        if event
            .table_state()
            .is_some_and(|state| state.is_turn_of(&self.player_id))
        {
            self.print(self.renderer.success("Your turn! Type 'state' to see the table."))?;
        }
        Ok(())
    }

    fn print(&mut self, text: String) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "\n{PROMPT}")?;
        self.out.flush()?;
        Ok(())
    }
}

async fn next_event(
    events: &mut Option<mpsc::UnboundedReceiver<ServerEvent>>,
) -> Option<ServerEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
