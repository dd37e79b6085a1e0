//! HTTP API client for the poker server.

use log::{debug, info};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::errors::{ClientError, Result};
use crate::entities::{ActionKind, Chips, TableState, TableSummary};

/// Table and player identity handed out by a successful join.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Seat {
    pub table_id: String,
    pub player_id: String,
}

#[derive(Debug, Deserialize)]
struct TableList {
    tables: Vec<TableSummary>,
}

/// Response to table creation.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct CreatedTable {
    pub table_id: String,
    #[serde(default)]
    pub max_players: usize,
    #[serde(default)]
    pub small_blind: Chips,
    #[serde(default)]
    pub big_blind: Chips,
}

/// Response to joining a table.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct JoinResponse {
    pub player_id: String,
    /// Snapshot with the new player's own cards visible.
    pub table_state: TableState,
    /// Only issued to bots.
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct ActionRequest<'a> {
    player_id: &'a str,
    action: ActionKind,
    amount: Chips,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    table_state: TableState,
}

/// Server liveness report.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub tables: usize,
    #[serde(default)]
    pub active_connections: usize,
}

/// API client for communicating with the poker server
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    seat: Option<Seat>,
}

impl ApiClient {
    /// Create a new API client. A trailing `/` on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
            seat: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Identity from the last successful join.
    pub fn seat(&self) -> Option<&Seat> {
        self.seat.as_ref()
    }

    fn require_seat(&self) -> Result<&Seat> {
        self.seat.as_ref().ok_or(ClientError::NotJoined)
    }

    /// List all tables on the server
    pub async fn list_tables(&self) -> Result<Vec<TableSummary>> {
        let url = format!("{}/api/tables", self.base_url);
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let list: TableList = decode(response).await?;

        Ok(list.tables)
    }

    /// Create a new table with the given seat count and small blind
    pub async fn create_table(
        &self,
        max_players: usize,
        small_blind: Chips,
    ) -> Result<CreatedTable> {
        let url = format!("{}/api/tables", self.base_url);
        debug!("POST {url} max_players={max_players} small_blind={small_blind}");

        let response = self
            .client
            .post(url)
            .query(&[
                ("max_players", max_players.to_string()),
                ("small_blind", small_blind.to_string()),
            ])
            .send()
            .await?;
        let created: CreatedTable = decode(response).await?;

        info!("Created table {}", created.table_id);
        Ok(created)
    }

    /// Take a seat at `table_id`. On success the client remembers the
    /// table and player ids for every later call.
    pub async fn join_table(
        &mut self,
        table_id: &str,
        player_name: &str,
        is_bot: bool,
    ) -> Result<JoinResponse> {
        let url = format!("{}/api/tables/{}/join", self.base_url, table_id);
        debug!("POST {url} player_name={player_name} is_bot={is_bot}");

        let response = self
            .client
            .post(url)
            .query(&[
                ("player_name", player_name.to_string()),
                ("is_bot", is_bot.to_string()),
            ])
            .send()
            .await?;
        let joined: JoinResponse = decode(response).await?;

        info!("Joined table {table_id} as {}", joined.player_id);
        self.seat = Some(Seat {
            table_id: table_id.to_string(),
            player_id: joined.player_id.clone(),
        });

        Ok(joined)
    }

    /// Fetch the table as seen by the seated player
    pub async fn table_state(&self) -> Result<TableState> {
        let seat = self.require_seat()?;
        let url = format!("{}/api/tables/{}", self.base_url, seat.table_id);
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .query(&[("player_id", seat.player_id.as_str())])
            .send()
            .await?;

        decode(response).await
    }

    /// Submit a betting action. `amount` is only read by the server for
    /// bets and raises, where it is the bet size and the total to raise to
    /// respectively.
    pub async fn perform_action(&self, action: ActionKind, amount: Chips) -> Result<TableState> {
        let seat = self.require_seat()?;
        let url = format!("{}/api/tables/{}/action", self.base_url, seat.table_id);
        debug!("POST {url} action={action} amount={amount}");

        let request = ActionRequest {
            player_id: &seat.player_id,
            action,
            amount,
        };
        let response = self.client.post(url).json(&request).send().await?;
        let result: ActionResponse = decode(response).await?;

        Ok(result.table_state)
    }

    /// Check server liveness
    pub async fn health(&self) -> Result<Health> {
        let url = format!("{}/health", self.base_url);
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    /// WebSocket URL for the seated player's push channel
    pub fn websocket_url(&self) -> Result<String> {
        let seat = self.require_seat()?;
        let ws_base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            return Err(ClientError::InvalidUrl(self.base_url.clone()));
        };

        Ok(format!("{}/ws/{}/{}", ws_base, seat.table_id, seat.player_id))
    }
}

/// Turn a response into `T`, or into [`ClientError::Server`] for non-2xx
/// statuses.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ClientError::Server {
            status: status.as_u16(),
            detail: error_detail(status.as_u16(), &body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Error text from a `{"detail": ...}` body, falling back to the raw body.
fn error_detail(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        match map.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }

    let body = body.trim();
    if body.is_empty() {
        format!("Request failed with status {status}")
    } else {
        format!("Request failed: {body}")
    }
}
