use remote_poker::entities::{ActionKind, Chips};
use std::fmt;

/// A line of user input, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A betting action with its amount; zero for actions that take none.
    Act(ActionKind, Chips),
    /// Fetch and reprint the table.
    State,
    /// List the server's tables.
    Tables,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `bet` or `raise` given without an amount.
    MissingAmount(ActionKind),
    /// Amount isn't a non-negative integer.
    InvalidAmount(String),
    /// Unrecognized command.
    UnknownCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAmount(action) => write!(f, "usage: {action} <amount>"),
            Self::InvalidAmount(value) => write!(f, "invalid amount: {value}"),
            Self::UnknownCommand(cmd) => {
                write!(f, "unknown command: {cmd} (type 'help' for commands)")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a line of input into a [`Command`].
///
/// The first word picks the command, case-insensitively. Blank input
/// parses to `Ok(None)`.
///
/// # Examples
///
/// ```
/// use remote_poker::entities::ActionKind;
/// use rp_client::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("c"), Ok(Some(Command::Act(ActionKind::Call, 0))));
/// assert_eq!(parse_command("raise 40"), Ok(Some(Command::Act(ActionKind::Raise, 40))));
/// assert_eq!(parse_command("   "), Ok(None));
/// ```
pub fn parse_command(input: &str) -> Result<Option<Command>, ParseError> {
    let mut parts = input.split_whitespace();
    let Some(first) = parts.next() else {
        return Ok(None);
    };

    let command = match first.to_lowercase().as_str() {
        "fold" | "f" => Command::Act(ActionKind::Fold, 0),
        "check" | "k" => Command::Act(ActionKind::Check, 0),
        "call" | "c" => Command::Act(ActionKind::Call, 0),
        "bet" | "b" => parse_amount(ActionKind::Bet, parts.next())?,
        "raise" | "r" => parse_amount(ActionKind::Raise, parts.next())?,
        "allin" | "all-in" | "a" => Command::Act(ActionKind::AllIn, 0),
        "state" | "s" => Command::State,
        "tables" | "t" => Command::Tables,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(ParseError::UnknownCommand(first.to_string())),
    };

    Ok(Some(command))
}

fn parse_amount(action: ActionKind, value: Option<&str>) -> Result<Command, ParseError> {
    let value = value.ok_or(ParseError::MissingAmount(action))?;
    let amount = value
        .parse::<Chips>()
        .map_err(|_| ParseError::InvalidAmount(value.to_string()))?;
    Ok(Command::Act(action, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(action: ActionKind, amount: Chips) -> Result<Option<Command>, ParseError> {
        Ok(Some(Command::Act(action, amount)))
    }

    // === Action command tests ===

    #[test]
    fn test_parse_fold() {
        assert_eq!(parse_command("fold"), act(ActionKind::Fold, 0));
        assert_eq!(parse_command("f"), act(ActionKind::Fold, 0));
    }

    #[test]
    fn test_parse_check() {
        assert_eq!(parse_command("check"), act(ActionKind::Check, 0));
        assert_eq!(parse_command("k"), act(ActionKind::Check, 0));
    }

    #[test]
    fn test_parse_call() {
        assert_eq!(parse_command("call"), act(ActionKind::Call, 0));
        assert_eq!(parse_command("c"), act(ActionKind::Call, 0));
    }

    #[test]
    fn test_parse_all_in() {
        for input in ["allin", "all-in", "a"] {
            assert_eq!(parse_command(input), act(ActionKind::AllIn, 0), "{input}");
        }
    }

    // === Amount command tests ===

    #[test]
    fn test_parse_bet_with_amount() {
        assert_eq!(parse_command("bet 50"), act(ActionKind::Bet, 50));
        assert_eq!(parse_command("b 50"), act(ActionKind::Bet, 50));
    }

    #[test]
    fn test_parse_raise_with_amount() {
        assert_eq!(parse_command("raise 100"), act(ActionKind::Raise, 100));
        assert_eq!(parse_command("r 999999"), act(ActionKind::Raise, 999_999));
    }

    #[test]
    fn test_parse_amount_ignores_extra_words() {
        assert_eq!(parse_command("bet 20 please"), act(ActionKind::Bet, 20));
    }

    #[test]
    fn test_parse_bet_without_amount() {
        assert_eq!(
            parse_command("bet"),
            Err(ParseError::MissingAmount(ActionKind::Bet))
        );
    }

    #[test]
    fn test_parse_raise_without_amount() {
        assert_eq!(
            parse_command("r"),
            Err(ParseError::MissingAmount(ActionKind::Raise))
        );
    }

    #[test]
    fn test_parse_invalid_amounts() {
        for value in ["abc", "-50", "10.5"] {
            assert_eq!(
                parse_command(&format!("raise {value}")),
                Err(ParseError::InvalidAmount(value.to_string()))
            );
        }
    }

    // === Other commands ===

    #[test]
    fn test_parse_info_commands() {
        assert_eq!(parse_command("state"), Ok(Some(Command::State)));
        assert_eq!(parse_command("s"), Ok(Some(Command::State)));
        assert_eq!(parse_command("tables"), Ok(Some(Command::Tables)));
        assert_eq!(parse_command("t"), Ok(Some(Command::Tables)));
    }

    #[test]
    fn test_parse_help() {
        for input in ["help", "h", "?"] {
            assert_eq!(parse_command(input), Ok(Some(Command::Help)), "{input}");
        }
    }

    #[test]
    fn test_parse_quit() {
        for input in ["quit", "exit", "q"] {
            assert_eq!(parse_command(input), Ok(Some(Command::Quit)), "{input}");
        }
    }

    // === Whitespace and case handling ===

    #[test]
    fn test_parse_with_surrounding_whitespace() {
        assert_eq!(parse_command("  check  "), act(ActionKind::Check, 0));
        assert_eq!(parse_command("\tbet   30\n"), act(ActionKind::Bet, 30));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_command("FOLD"), act(ActionKind::Fold, 0));
        assert_eq!(parse_command("Raise 10"), act(ActionKind::Raise, 10));
        assert_eq!(parse_command("ALL-IN"), act(ActionKind::AllIn, 0));
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
    }

    // === Error cases ===

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse_command("dance now"),
            Err(ParseError::UnknownCommand("dance".to_string()))
        );
    }

    // === Error message tests ===

    #[test]
    fn test_error_message_missing_amount() {
        assert_eq!(
            ParseError::MissingAmount(ActionKind::Bet).to_string(),
            "usage: bet <amount>"
        );
        assert_eq!(
            ParseError::MissingAmount(ActionKind::Raise).to_string(),
            "usage: raise <amount>"
        );
    }

    #[test]
    fn test_error_message_invalid_amount() {
        let error = ParseError::InvalidAmount("abc".to_string());
        assert_eq!(error.to_string(), "invalid amount: abc");
    }

    #[test]
    fn test_error_message_unknown_command() {
        let msg = ParseError::UnknownCommand("xyz".to_string()).to_string();
        assert!(msg.contains("unknown command: xyz"));
        assert!(msg.contains("help"));
    }
}
