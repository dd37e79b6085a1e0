//! In-process stand-in for the poker server, speaking the same REST and
//! WebSocket contract on an OS-assigned port.
//!
//! It keeps just enough table state to exercise the client: seats, turn
//! order, last action and pot. It does not play poker.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::{sync::broadcast, task::JoinHandle};

/// Hole cards dealt to every mock player.
pub const HOLE_CARDS: [&str; 2] = ["A♠", "10♥"];

struct MockPlayer {
    id: String,
    name: String,
    is_bot: bool,
    chips: u64,
    current_bet: u64,
}

struct MockTable {
    id: String,
    max_players: usize,
    small_blind: u64,
    players: Vec<MockPlayer>,
    turn: usize,
    pot: u64,
    current_bet: u64,
    last_action: Option<Value>,
}

impl MockTable {
    fn current_player(&self) -> Option<&MockPlayer> {
        if self.players.len() < 2 {
            return None;
        }
        self.players.get(self.turn % self.players.len())
    }

    fn view(&self, viewer: Option<&str>) -> Value {
        let phase = if self.players.len() < 2 { "waiting" } else { "pre_flop" };
        let players: Vec<Value> = self
            .players
            .iter()
            .map(|p| {
                let cards = if viewer == Some(p.id.as_str()) {
                    json!(HOLE_CARDS)
                } else {
                    json!(["hidden", "hidden"])
                };
                json!({
                    "id": p.id,
                    "name": p.name,
                    "chips": p.chips,
                    "current_bet": p.current_bet,
                    "cards": cards,
                    "folded": false,
                    "is_bot": p.is_bot,
                    "all_in": false,
                })
            })
            .collect();

        json!({
            "table_id": self.id,
            "pot": self.pot,
            "current_bet": self.current_bet,
            "community_cards": [],
            "phase": phase,
            "small_blind": self.small_blind,
            "big_blind": self.small_blind * 2,
            "current_player_id": self.current_player().map(|p| p.id.clone()),
            "players": players,
            "last_action": self.last_action,
        })
    }
}

#[derive(Default)]
struct Tables {
    by_id: HashMap<String, MockTable>,
    next_id: usize,
}

/// Shared mock server state.
#[derive(Clone)]
pub struct MockServer {
    tables: Arc<Mutex<Tables>>,
    events: broadcast::Sender<String>,
    pings: Arc<AtomicUsize>,
}

impl Default for MockServer {
    fn default() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            tables: Arc::default(),
            events,
            pings: Arc::default(),
        }
    }
}

impl MockServer {
    /// Keep-alive frames received over all sockets.
    pub fn pings(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    fn broadcast(&self, event: Value) {
        // No subscribers is fine
        let _ = self.events.send(event.to_string());
    }
}

/// A running mock server.
pub struct Running {
    pub base_url: String,
    pub server: MockServer,
    handle: JoinHandle<()>,
}

impl Drop for Running {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start the mock server on `127.0.0.1:0`.
pub async fn spawn() -> Running {
    let server = MockServer::default();
    let app = router(server.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("mock server error: {e}");
        }
    });

    Running {
        base_url: format!("http://{addr}"),
        server,
        handle,
    }
}

/// Serve `app` on `127.0.0.1:0` and return its base URL and task handle.
pub async fn spawn_router(app: Router) -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind router");
    let addr = listener.local_addr().expect("router address");
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), handle)
}

fn router(server: MockServer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tables", get(list_tables).post(create_table))
        .route("/api/tables/{table_id}", get(table_state))
        .route("/api/tables/{table_id}/join", post(join_table))
        .route("/api/tables/{table_id}/action", post(perform_action))
        .route("/ws/{table_id}/{player_id}", get(websocket))
        .with_state(server)
}

fn detail(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

async fn health(State(server): State<MockServer>) -> Json<Value> {
    let tables = server.tables.lock().unwrap().by_id.len();
    Json(json!({
        "status": "healthy",
        "tables": tables,
        "active_connections": server.events.receiver_count(),
    }))
}

async fn list_tables(State(server): State<MockServer>) -> Json<Value> {
    let tables = server.tables.lock().unwrap();
    let mut rows: Vec<&MockTable> = tables.by_id.values().collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id));
    let rows: Vec<Value> = rows
        .into_iter()
        .map(|t| {
            json!({
                "table_id": t.id,
                "players": t.players.len(),
                "max_players": t.max_players,
                "phase": if t.players.len() < 2 { "waiting" } else { "pre_flop" },
                "small_blind": t.small_blind,
            })
        })
        .collect();
    Json(json!({ "tables": rows }))
}

#[derive(Deserialize)]
struct CreateParams {
    #[serde(default = "default_max_players")]
    max_players: usize,
    #[serde(default = "default_small_blind")]
    small_blind: u64,
}

fn default_max_players() -> usize {
    6
}

fn default_small_blind() -> u64 {
    5
}

async fn create_table(
    State(server): State<MockServer>,
    Query(params): Query<CreateParams>,
) -> Json<Value> {
    let mut tables = server.tables.lock().unwrap();
    tables.next_id += 1;
    let id = format!("table-{:04}-{}", tables.next_id, "0000-4000-8000-000000000000");
    tables.by_id.insert(
        id.clone(),
        MockTable {
            id: id.clone(),
            max_players: params.max_players,
            small_blind: params.small_blind,
            players: Vec::new(),
            turn: 0,
            pot: 0,
            current_bet: 0,
            last_action: None,
        },
    );

    Json(json!({
        "table_id": id,
        "max_players": params.max_players,
        "small_blind": params.small_blind,
        "big_blind": params.small_blind * 2,
    }))
}

#[derive(Deserialize)]
struct ViewerParams {
    player_id: Option<String>,
}

async fn table_state(
    State(server): State<MockServer>,
    Path(table_id): Path<String>,
    Query(params): Query<ViewerParams>,
) -> Response {
    let tables = server.tables.lock().unwrap();
    match tables.by_id.get(&table_id) {
        Some(table) => Json(table.view(params.player_id.as_deref())).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Table not found"),
    }
}

#[derive(Deserialize)]
struct JoinParams {
    player_name: String,
    #[serde(default)]
    is_bot: bool,
}

async fn join_table(
    State(server): State<MockServer>,
    Path(table_id): Path<String>,
    Query(params): Query<JoinParams>,
) -> Response {
    let (response, event) = {
        let mut tables = server.tables.lock().unwrap();
        let Some(table) = tables.by_id.get_mut(&table_id) else {
            return detail(StatusCode::NOT_FOUND, "Table not found");
        };
        if table.players.len() >= table.max_players {
            return detail(StatusCode::BAD_REQUEST, "Table is full");
        }

        let player_id = format!("player-{}-{}", table.players.len() + 1, params.player_name);
        table.players.push(MockPlayer {
            id: player_id.clone(),
            name: params.player_name.clone(),
            is_bot: params.is_bot,
            chips: 1000,
            current_bet: 0,
        });

        let mut response = json!({
            "player_id": player_id,
            "table_state": table.view(Some(&player_id)),
        });
        if params.is_bot {
            response["api_token"] = json!(format!("token_{player_id}"));
        }
        let event = json!({
            "type": "player_joined",
            "player_id": player_id,
            "player_name": params.player_name,
            "table_state": table.view(None),
        });
        (response, event)
    };

    server.broadcast(event);
    Json(response).into_response()
}

#[derive(Deserialize)]
struct ActionBody {
    player_id: String,
    action: String,
    #[serde(default)]
    amount: Option<u64>,
}

async fn perform_action(
    State(server): State<MockServer>,
    Path(table_id): Path<String>,
    Json(body): Json<ActionBody>,
) -> Response {
    let (response, event) = {
        let mut tables = server.tables.lock().unwrap();
        let Some(table) = tables.by_id.get_mut(&table_id) else {
            return detail(StatusCode::NOT_FOUND, "Table not found");
        };

        let Some(current) = table.current_player() else {
            return detail(StatusCode::BAD_REQUEST, "Not your turn. Current player: unknown");
        };
        if current.id != body.player_id {
            let message = format!("Not your turn. Current player: {}", current.name);
            return detail(StatusCode::BAD_REQUEST, &message);
        }
        let name = current.name.clone();

        let amount = body.amount.unwrap_or(0);
        let idx = table.turn % table.players.len();
        let player = &mut table.players[idx];
        let paid = amount.min(player.chips);
        player.chips -= paid;
        player.current_bet += paid;
        table.pot += paid;
        table.current_bet = table.current_bet.max(player.current_bet);
        table.last_action = Some(json!({
            "player_id": body.player_id,
            "player_name": name,
            "action": body.action,
            "amount": amount,
        }));
        table.turn += 1;

        let response = json!({
            "success": true,
            "table_state": table.view(Some(&body.player_id)),
        });
        let event = json!({
            "type": "action_performed",
            "player_id": body.player_id,
            "player_name": name,
            "action": body.action,
            "amount": body.amount,
            "table_state": table.view(None),
        });
        (response, event)
    };

    server.broadcast(event);
    Json(response).into_response()
}

async fn websocket(
    ws: WebSocketUpgrade,
    Path((table_id, player_id)): Path<(String, String)>,
    State(server): State<MockServer>,
) -> Response {
    ws.on_upgrade(move |socket| serve_socket(socket, server, table_id, player_id))
}

async fn serve_socket(
    mut socket: WebSocket,
    server: MockServer,
    table_id: String,
    player_id: String,
) {
    let mut events = server.events.subscribe();

    let hello = json!({
        "type": "connected",
        "player_id": player_id,
        "table_id": table_id,
    });
    // A frame the client can't decode, which it must skip
    for frame in [hello.to_string(), "welcome".to_string()] {
        if socket.send(Message::Text(frame.into())).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) if text.as_str() == "ping" => {
                    server.pings.fetch_add(1, Ordering::SeqCst);
                    if socket.send(Message::Text("pong".to_string().into())).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            event = events.recv() => match event {
                Ok(text) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}
