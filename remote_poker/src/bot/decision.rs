//! Bot decision-making: a pot-odds-free strategy driven by how much of
//! the bot's stack a call would cost.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fmt;

use crate::entities::{ActionKind, Chips, TableState};

/// Configuration for bot decision-making thresholds.
///
/// Probabilities are in `[0.0, 1.0]`; values outside are clamped.
///
/// # Examples
///
/// ```
/// use remote_poker::bot::decision::BotDecisionConfig;
///
/// let config = BotDecisionConfig::default();
/// assert_eq!(config.bet_probability, 0.3);
/// assert_eq!(config.large_call_ratio, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct BotDecisionConfig {
    /// Chance of betting instead of checking when nothing is owed.
    pub bet_probability: f64,

    /// Call cost over stack above which a call counts as large.
    pub large_call_ratio: f64,

    /// Chance of folding to a large call.
    pub large_fold_probability: f64,

    /// Call cost over stack above which a call counts as medium.
    pub medium_call_ratio: f64,

    /// Chance of folding to a medium call.
    pub medium_fold_probability: f64,

    /// Chance of flat-calling a small call; otherwise the bot raises.
    pub small_call_probability: f64,

    /// Bet and raise increment, in small blinds.
    pub bet_size_in_small_blinds: Chips,
}

impl Default for BotDecisionConfig {
    fn default() -> Self {
        Self {
            bet_probability: 0.3,
            large_call_ratio: 0.5,
            large_fold_probability: 0.7,
            medium_call_ratio: 0.2,
            medium_fold_probability: 0.4,
            small_call_probability: 0.8,
            bet_size_in_small_blinds: 2,
        }
    }
}

/// What the bot wants to do, ready to submit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Decision {
    pub action: ActionKind,
    /// Bet size for bets, total to raise to for raises, zero otherwise.
    pub amount: Chips,
}

impl Decision {
    pub fn new(action: ActionKind, amount: Chips) -> Self {
        Self { action, amount }
    }

    fn simple(action: ActionKind) -> Self {
        Self::new(action, 0)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount > 0 {
            write!(f, "{} ¥{}", self.action, self.amount)
        } else {
            write!(f, "{}", self.action)
        }
    }
}

/// Bot decision maker
pub struct BotDecisionMaker<R = StdRng> {
    rng: R,
    config: BotDecisionConfig,
}

impl BotDecisionMaker<StdRng> {
    /// Create a new decision maker with default config
    pub fn new() -> Self {
        Self::with_config(BotDecisionConfig::default())
    }

    /// Create a new decision maker with custom config
    pub fn with_config(config: BotDecisionConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl Default for BotDecisionMaker<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> BotDecisionMaker<R> {
    /// Create a decision maker drawing from `rng`, e.g. a seeded one.
    pub fn with_rng(config: BotDecisionConfig, rng: R) -> Self {
        Self { rng, config }
    }

    pub fn config(&self) -> &BotDecisionConfig {
        &self.config
    }

    /// Decide what `player_id` should do in `state`.
    ///
    /// A bot that isn't seated folds. When nothing is owed it mostly
    /// checks and sometimes opens. Otherwise the share of its stack needed
    /// to call decides how often it folds, and small calls are sometimes
    /// raised.
    pub fn decide(&mut self, state: &TableState, player_id: &str) -> Decision {
        let Some(bot) = state.player(player_id) else {
            return Decision::simple(ActionKind::Fold);
        };

        let to_call = bot.to_call(state.current_bet);
        let increment = state
            .small_blind
            .saturating_mul(self.config.bet_size_in_small_blinds);

        if to_call == 0 {
            let size = increment.min(bot.chips);
            if size == 0 || !self.chance(self.config.bet_probability) {
                return Decision::simple(ActionKind::Check);
            }
            // With a live bet already matched (the big blind pre-flop) the
            // server only accepts a raise.
            if state.current_bet > 0 {
                return Decision::new(ActionKind::Raise, state.current_bet + size);
            }
            return Decision::new(ActionKind::Bet, size);
        }

        let call_ratio = if bot.chips > 0 {
            to_call as f64 / bot.chips as f64
        } else {
            1.0
        };

        if call_ratio > self.config.large_call_ratio {
            self.fold_or_call(self.config.large_fold_probability)
        } else if call_ratio > self.config.medium_call_ratio {
            self.fold_or_call(self.config.medium_fold_probability)
        } else if self.chance(self.config.small_call_probability) {
            Decision::simple(ActionKind::Call)
        } else {
            let size = increment.min(bot.chips.saturating_sub(to_call));
            if size == 0 {
                return Decision::simple(ActionKind::Call);
            }
            Decision::new(ActionKind::Raise, state.current_bet + size)
        }
    }

    fn fold_or_call(&mut self, fold_probability: f64) -> Decision {
        if self.chance(fold_probability) {
            Decision::simple(ActionKind::Fold)
        } else {
            Decision::simple(ActionKind::Call)
        }
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}
