//! Polling loop that seats a bot and plays until it keeps failing.

use async_trait::async_trait;
use log::{debug, info, warn};
use rand::Rng;
use std::time::Duration;

use super::decision::BotDecisionMaker;
use crate::{
    entities::{ActionKind, Chips, TableState},
    net::{api_client::ApiClient, errors::Result},
};

/// The two calls a playing bot needs. Implemented by [`ApiClient`] once it
/// has joined a table.
#[async_trait]
pub trait TableApi: Send + Sync {
    /// Fetch the table as the bot sees it
    async fn table_state(&self) -> Result<TableState>;

    /// Submit an action for the bot
    async fn perform_action(&self, action: ActionKind, amount: Chips) -> Result<TableState>;
}

#[async_trait]
impl TableApi for ApiClient {
    async fn table_state(&self) -> Result<TableState> {
        ApiClient::table_state(self).await
    }

    async fn perform_action(&self, action: ActionKind, amount: Chips) -> Result<TableState> {
        ApiClient::perform_action(self, action, amount).await
    }
}

/// Pacing and give-up limits for [`BotRunner`].
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Pause between polls, and after every action attempt
    pub poll_interval: Duration,
    /// Pause after a failed state fetch
    pub error_backoff: Duration,
    /// Stop after this many failures in a row
    pub max_consecutive_errors: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            error_backoff: Duration::from_secs(2),
            max_consecutive_errors: 10,
        }
    }
}

/// Outcome of a finished [`BotRunner::run`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BotReport {
    /// Actions the server accepted
    pub actions_taken: u64,
    /// Failure streak that ended the run
    pub consecutive_errors: u32,
}

/// Drives one seated bot.
pub struct BotRunner<A, R> {
    api: A,
    player_id: String,
    name: String,
    decision_maker: BotDecisionMaker<R>,
    config: RunnerConfig,
}

impl<A: TableApi, R: Rng> BotRunner<A, R> {
    pub fn new(
        api: A,
        player_id: impl Into<String>,
        name: impl Into<String>,
        decision_maker: BotDecisionMaker<R>,
        config: RunnerConfig,
    ) -> Self {
        Self {
            api,
            player_id: player_id.into(),
            name: name.into(),
            decision_maker,
            config,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Poll the table and act on the bot's turns.
    ///
    /// Fetch errors and rejected actions both count toward
    /// `max_consecutive_errors`; a poll where it isn't the bot's turn and
    /// an accepted action both reset the count.
    pub async fn run(&mut self) -> BotReport {
        let mut report = BotReport::default();
        info!("Bot {} is playing", self.name);

        while report.consecutive_errors < self.config.max_consecutive_errors {
            let state = match self.api.table_state().await {
                Ok(state) => state,
                Err(e) => {
                    warn!("Bot {} could not fetch table state: {e}", self.name);
                    report.consecutive_errors += 1;
                    tokio::time::sleep(self.config.error_backoff).await;
                    continue;
                }
            };

            if !state.is_turn_of(&self.player_id) {
                report.consecutive_errors = 0;
                tokio::time::sleep(self.config.poll_interval).await;
                continue;
            }

            let decision = self.decision_maker.decide(&state, &self.player_id);
            match self
                .api
                .perform_action(decision.action, decision.amount)
                .await
            {
                Ok(_) => {
                    info!("Bot {}: {decision}", self.name);
                    report.actions_taken += 1;
                    report.consecutive_errors = 0;
                }
                Err(e) if e.is_rejection() => {
                    // Turn moved on or the action was illegal; try again next poll
                    debug!("Bot {} {decision} rejected: {e}", self.name);
                    report.consecutive_errors += 1;
                }
                Err(e) => {
                    warn!("Bot {} could not act: {e}", self.name);
                    report.consecutive_errors += 1;
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }

        warn!(
            "Bot {} stopping after {} consecutive errors",
            self.name, report.consecutive_errors
        );
        report
    }
}

/// Id of the first listed table with an open seat, creating a table with
/// `max_players` seats and `small_blind` when none has room. A failed
/// listing counts as no tables.
pub async fn find_open_table(
    client: &ApiClient,
    max_players: usize,
    small_blind: Chips,
) -> Result<String> {
    let tables = match client.list_tables().await {
        Ok(tables) => tables,
        Err(e) => {
            warn!("Failed to list tables: {e}");
            Vec::new()
        }
    };
    if let Some(table) = tables.iter().find(|t| t.has_open_seat()) {
        info!("Found table {} with an open seat", table.table_id);
        return Ok(table.table_id.clone());
    }

    info!("No open tables, creating one");
    Ok(client.create_table(max_players, small_blind).await?.table_id)
}
