//! Table snapshots as reported by the poker server.
//!
//! Every type here mirrors a JSON object the server sends. Snapshots are
//! replaced wholesale on each response; nothing is merged or validated
//! locally, since the server owns the rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chip amounts, bets and blinds.
pub type Chips = u64;

/// Wire representation of an opponent's face-down card.
pub const HIDDEN_CARD: &str = "hidden";

/// First eight characters of a server-issued id, enough to tell tables
/// and players apart on screen.
pub fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(end, _)| &id[..end])
}

/// Card suits as drawn by the server (`♠ ♥ ♦ ♣`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '♣' => Some(Self::Club),
            '♦' => Some(Self::Diamond),
            '♥' => Some(Self::Heart),
            '♠' => Some(Self::Spade),
            _ => None,
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Self::Diamond | Self::Heart)
    }
}

/// A card as the server spells it, rank then suit symbol (e.g. `10♥`),
/// or [`HIDDEN_CARD`] when the viewer is not allowed to see it.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(String);

impl Card {
    pub fn new(repr: impl Into<String>) -> Self {
        Self(repr.into())
    }

    pub fn hidden() -> Self {
        Self(HIDDEN_CARD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_hidden(&self) -> bool {
        self.0 == HIDDEN_CARD
    }

    /// Suit of a visible card. `None` for hidden cards and unrecognized
    /// spellings.
    pub fn suit(&self) -> Option<Suit> {
        self.0.chars().last().and_then(Suit::from_symbol)
    }

    pub fn is_red(&self) -> bool {
        self.suit().is_some_and(Suit::is_red)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stage of the current hand.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Waiting,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    /// Any phase name this client doesn't know about.
    #[serde(other)]
    Unknown,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::PreFlop => "pre_flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Betting actions accepted by the server.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Bet => "bet",
            Self::Raise => "raise",
            Self::AllIn => "all_in",
        }
    }

    /// Whether the server reads the `amount` field for this action.
    pub fn takes_amount(&self) -> bool {
        matches!(self, Self::Bet | Self::Raise)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seated player as seen by the requesting client.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub chips: Chips,
    /// Chips committed during the current betting round.
    #[serde(default)]
    pub current_bet: Chips,
    /// Own cards are visible, opponents' are [`HIDDEN_CARD`].
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub folded: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub all_in: bool,
}

impl Player {
    /// Chips this player must add to match `table_bet`.
    pub fn to_call(&self, table_bet: Chips) -> Chips {
        table_bet.saturating_sub(self.current_bet)
    }
}

/// The most recent action taken at the table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LastAction {
    pub player_id: String,
    pub player_name: String,
    pub action: ActionKind,
    #[serde(default)]
    pub amount: Chips,
}

/// Full table snapshot.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub table_id: String,
    #[serde(default)]
    pub pot: Chips,
    #[serde(default)]
    pub current_bet: Chips,
    #[serde(default)]
    pub community_cards: Vec<Card>,
    #[serde(default)]
    pub phase: Phase,
    #[serde(default)]
    pub small_blind: Chips,
    #[serde(default)]
    pub big_blind: Chips,
    /// `None` while the table waits for players.
    #[serde(default)]
    pub current_player_id: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub last_action: Option<LastAction>,
}

impl TableState {
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// The player whose turn it is, if any.
    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_id
            .as_deref()
            .and_then(|id| self.player(id))
    }

    pub fn is_turn_of(&self, player_id: &str) -> bool {
        self.current_player_id.as_deref() == Some(player_id)
    }
}

/// One row of the table listing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub table_id: String,
    /// Seated player count.
    pub players: usize,
    pub max_players: usize,
    #[serde(default)]
    pub phase: Phase,
    pub small_blind: Chips,
}

impl TableSummary {
    pub fn has_open_seat(&self) -> bool {
        self.players < self.max_players
    }

    /// The server always sets the big blind to twice the small blind.
    pub fn big_blind(&self) -> Chips {
        self.small_blind.saturating_mul(2)
    }
}
