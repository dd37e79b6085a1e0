//! Plain-text rendering of tables and messages for the terminal.
//!
//! Every function returns a `String` and prints nothing, so the command
//! loop decides where output goes. Colour is applied with crossterm's
//! [`Stylize`] when the renderer has it enabled.

use chrono::{DateTime, Local};
use crossterm::style::{Color, Stylize};
use remote_poker::entities::{Card, TableState, TableSummary, short_id};
use std::fmt::Display;

/// Moves the cursor home and clears the terminal.
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

const FACE_DOWN: &str = "🂠";
const TABLE_WIDTH: usize = 80;
const HELP_WIDTH: usize = 60;

const HELP_ROWS: [(&str, &str); 10] = [
    ("fold, f", "Fold your hand"),
    ("check, k", "Check"),
    ("call, c", "Call the current bet"),
    ("bet <amount>, b", "Bet an amount"),
    ("raise <amount>, r", "Raise to an amount"),
    ("allin, a", "Go all in"),
    ("state, s", "Show current table state"),
    ("tables, t", "List tables on the server"),
    ("help, h, ?", "Show this help"),
    ("quit, exit, q", "Quit the game"),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_bold(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn banner(&self) -> String {
        let edge = "═".repeat(40);
        [
            self.paint(&format!("╔{edge}╗"), Color::Cyan),
            format!(
                "{}{}{}",
                self.paint("║", Color::Cyan),
                self.bold("          🎲 REMOTE POKER 🎲          "),
                self.paint("║", Color::Cyan)
            ),
            self.paint(&format!("╚{edge}╝"), Color::Cyan),
        ]
        .join("\n")
    }

    /// The table listing, or a notice when the server has none.
    pub fn tables(&self, tables: &[TableSummary]) -> String {
        if tables.is_empty() {
            return self.paint("No tables available.", Color::Yellow);
        }

        let rule = "─".repeat(TABLE_WIDTH);
        let mut lines = vec![
            self.bold("📋 Available Tables:"),
            rule.clone(),
            format!("{:<12} {:<10} {:<15} {:<10}", "Table ID", "Players", "Phase", "Blinds"),
            rule.clone(),
        ];
        for table in tables {
            let id = format!("{}...", short_id(&table.table_id));
            let players = format!("{}/{}", table.players, table.max_players);
            let blinds = format!("¥{}/¥{}", table.small_blind, table.big_blind());
            lines.push(format!(
                "{id:<12} {players:<10} {:<15} {blinds:<10}",
                table.phase.as_str()
            ));
        }
        lines.push(rule);
        lines.join("\n")
    }

    /// A single card in brackets, red for hearts and diamonds.
    pub fn card(&self, card: &Card) -> String {
        if card.is_hidden() {
            return FACE_DOWN.to_string();
        }
        let text = format!("[{card}]");
        if card.is_red() {
            self.paint(&text, Color::Red)
        } else {
            text
        }
    }

    fn cards(&self, cards: &[Card]) -> String {
        cards
            .iter()
            .map(|c| self.card(c))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Full table view from the point of view of `player_id`.
    pub fn table_state(&self, state: &TableState, player_id: &str) -> String {
        let heavy = "═".repeat(TABLE_WIDTH);
        let light = "─".repeat(TABLE_WIDTH);

        let mut lines = vec![
            self.bold("🎲 TABLE STATE"),
            heavy.clone(),
            format!("📊 Phase: {}", self.paint(state.phase.as_str(), Color::Green)),
            format!(
                "💰 Pot: {} | Current Bet: {}",
                self.paint(&format!("¥{}", state.pot), Color::Green),
                self.paint(&format!("¥{}", state.current_bet), Color::Yellow)
            ),
            heavy,
        ];

        if !state.community_cards.is_empty() {
            lines.push(String::new());
            lines.push(format!("🃏 Community Cards: {}", self.cards(&state.community_cards)));
        }

        lines.push(String::new());
        lines.push(self.bold("👥 PLAYERS:"));
        lines.push(light.clone());

        for player in &state.players {
            let prefix = if state.is_turn_of(&player.id) {
                self.paint("→ ", Color::Green)
            } else {
                "  ".to_string()
            };

            let mut name = player.name.clone();
            if player.id == player_id {
                name.push_str(" (YOU)");
            }
            if player.is_bot {
                name.push_str(" 🤖");
            }
            // Pad before styling so escape codes don't eat the column width
            let name = format!("{name:<25}");
            let name = if player.id == player_id {
                self.paint_bold(&name, Color::Cyan)
            } else {
                name
            };

            let mut row = format!(
                "{prefix}{name} 💵 ¥{:<6} Bet: ¥{:<4}",
                player.chips, player.current_bet
            );
            if player.folded {
                row.push(' ');
                row.push_str(&self.paint("[FOLDED]", Color::Red));
            } else if player.all_in {
                row.push(' ');
                row.push_str(&self.paint("[ALL IN]", Color::Yellow));
            }
            if !player.cards.is_empty() {
                row.push_str(" | Cards: ");
                row.push_str(&self.cards(&player.cards));
            }
            lines.push(row);
        }
        lines.push(light);

        if state.is_turn_of(player_id) {
            lines.push(String::new());
            lines.push(self.paint_bold("⏰ YOUR TURN! Enter your action.", Color::Green));
        } else if let Some(current) = state.current_player() {
            lines.push(String::new());
            lines.push(format!("⏰ Waiting for {}...", current.name));
        }

        if let Some(last) = &state.last_action {
            let mut action = format!("{} {}", last.player_name, last.action);
            if last.amount > 0 {
                action.push_str(&format!(" ¥{}", last.amount));
            }
            lines.push(String::new());
            lines.push(format!("📝 Last action: {action}"));
        }

        lines.join("\n")
    }

    pub fn help(&self) -> String {
        let rule = "─".repeat(HELP_WIDTH);
        let mut lines = vec![self.bold("📖 AVAILABLE COMMANDS:"), rule.clone()];
        lines.extend(
            HELP_ROWS
                .iter()
                .map(|(keys, what)| format!("  {keys:<17} - {what}")),
        );
        lines.push(rule);
        lines.join("\n")
    }

    pub fn error(&self, message: impl Display) -> String {
        self.paint(&format!("❌ Error: {message}"), Color::Red)
    }

    pub fn success(&self, message: impl Display) -> String {
        self.paint(&format!("✅ {message}"), Color::Green)
    }

    pub fn info(&self, message: impl Display) -> String {
        self.paint(&format!("ℹ️  {message}"), Color::Yellow)
    }

    /// A push-event line stamped with the current local time.
    pub fn notice(&self, message: impl Display) -> String {
        self.notice_at(Local::now(), message)
    }

    pub fn notice_at(&self, at: DateTime<Local>, message: impl Display) -> String {
        let stamp = format!("[{}]", at.format("%H:%M:%S"));
        format!("{} {message}", self.paint(&stamp, Color::DarkGrey))
    }
}
