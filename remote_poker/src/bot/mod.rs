//! Bot module providing an automated player for remote tables.
//!
//! This module implements:
//! - BotDecisionMaker: picks an action from a table snapshot
//! - BotRunner: polls the server and acts whenever it is the bot's turn
//! - find_open_table: seat selection, creating a table when all are full
//!
//! ## Strategy
//!
//! The bot never looks at its cards. It compares the chips needed to call
//! with its stack:
//! - Nothing owed: check, opening for two small blinds 30% of the time
//! - Call above half the stack: fold 70%
//! - Call above a fifth of the stack: fold 40%
//! - Smaller calls: call 80%, raise by two small blinds otherwise
//!
//! ## Example
//!
//! ```no_run
//! use remote_poker::{
//!     ApiClient,
//!     bot::{BotDecisionMaker, BotRunner, RunnerConfig, find_open_table},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ApiClient::new("http://localhost:8000");
//!     let table_id = find_open_table(&client, 6, 5).await?;
//!     let joined = client.join_table(&table_id, "Bot1", true).await?;
//!
//!     let mut runner = BotRunner::new(
//!         client,
//!         joined.player_id,
//!         "Bot1",
//!         BotDecisionMaker::new(),
//!         RunnerConfig::default(),
//!     );
//!     let report = runner.run().await;
//!     println!("Bot acted {} times", report.actions_taken);
//!     Ok(())
//! }
//! ```

pub mod decision;
pub mod runner;

pub use decision::{BotDecisionConfig, BotDecisionMaker, Decision};
pub use runner::{BotReport, BotRunner, RunnerConfig, TableApi, find_open_table};
