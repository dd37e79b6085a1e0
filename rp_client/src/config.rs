//! Client configuration management.
//!
//! Each setting comes from a command-line flag, then the environment, then
//! a built-in default, and is validated before the client starts.

use remote_poker::entities::Chips;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_SMALL_BLIND: Chips = 5;
pub const DEFAULT_MAX_PLAYERS: usize = 6;
const FALLBACK_NAME: &str = "Player";

/// Values given on the command line. `None` and `false` defer to the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub server_url: Option<String>,
    pub player_name: Option<String>,
    pub table_id: Option<String>,
    pub small_blind: Option<Chips>,
    pub max_players: Option<usize>,
    pub no_color: bool,
    pub no_websocket: bool,
    pub list_only: bool,
}

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the poker server's REST API
    pub server_url: String,
    pub player_name: String,
    /// Table to join; a new table is created when unset
    pub table_id: Option<String>,
    /// Small blind for a table created by the client
    pub small_blind: Chips,
    /// Seats for a table created by the client
    pub max_players: usize,
    pub color: bool,
    /// Subscribe to push events; polling only when off
    pub websocket: bool,
    /// Print the table list and exit
    pub list_only: bool,
}

impl ClientConfig {
    /// Resolve configuration from `overrides` and the process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from `overrides`, reading environment
    /// variables through `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric variable doesn't
    /// parse or the result fails [`ClientConfig::validate`].
    pub fn resolve<F>(overrides: ConfigOverrides, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = overrides
            .server_url
            .or_else(|| env("POKER_SERVER_URL"))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let player_name = overrides
            .player_name
            .or_else(|| env("POKER_PLAYER_NAME"))
            .or_else(|| whoami::fallible::username().ok())
            .unwrap_or_else(|| FALLBACK_NAME.to_string());

        let table_id = overrides
            .table_id
            .or_else(|| env("POKER_TABLE_ID"))
            .filter(|id| !id.trim().is_empty());

        let small_blind = match overrides.small_blind {
            Some(value) => value,
            None => parse_env_or(&env, "POKER_SMALL_BLIND", DEFAULT_SMALL_BLIND)?,
        };

        let max_players = match overrides.max_players {
            Some(value) => value,
            None => parse_env_or(&env, "POKER_MAX_PLAYERS", DEFAULT_MAX_PLAYERS)?,
        };

        // Any non-empty NO_COLOR turns colour off
        let color = !overrides.no_color && env("NO_COLOR").is_none_or(|v| v.is_empty());

        let config = Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            player_name: player_name.trim().to_string(),
            table_id,
            small_blind,
            max_players,
            color,
            websocket: !overrides.no_websocket,
            list_only: overrides.list_only,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "POKER_SERVER_URL".to_string(),
                reason: format!("Must start with http:// or https:// (got '{}')", self.server_url),
            });
        }

        if self.player_name.is_empty() {
            return Err(ConfigError::Invalid {
                var: "POKER_PLAYER_NAME".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.small_blind == 0 {
            return Err(ConfigError::Invalid {
                var: "POKER_SMALL_BLIND".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if !(2..=10).contains(&self.max_players) {
            return Err(ConfigError::Invalid {
                var: "POKER_MAX_PLAYERS".to_string(),
                reason: "Must be between 2 and 10".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_env_or<T, F>(env: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match env(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{value}' is not a valid number"),
        }),
        None => Ok(default),
    }
}
