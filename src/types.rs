//! Shared types for the FightBet game.
//!
//! These types form the data model used across all modules.
//! The engine, storage, and presentation layers all depend on them
//! without depending on each other.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Balance a fresh installation starts with.
pub const DEFAULT_BALANCE: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// One of the three mutually exclusive fight results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    PlayerOneWins,
    PlayerTwoWins,
    Tie,
}

impl Outcome {
    /// All outcomes in draw order. Order matters: boundary values resolve
    /// to the later entry because the cumulative comparison is strict.
    pub const ALL: [Outcome; 3] = [Outcome::PlayerOneWins, Outcome::PlayerTwoWins, Outcome::Tie];

    /// Probability weight in tenths of a percent (the table sums to 1000).
    pub fn weight_tenths(&self) -> u32 {
        match self {
            Outcome::PlayerOneWins => 458,
            Outcome::PlayerTwoWins => 446,
            Outcome::Tie => 96,
        }
    }

    /// Probability weight as a percentage (45.8, 44.6, 9.6).
    pub fn chance_pct(&self) -> f64 {
        self.weight_tenths() as f64 / 10.0
    }

    /// Multiple of the stake paid back when this outcome is predicted correctly.
    pub fn payout_multiplier(&self) -> f64 {
        match self {
            Outcome::Tie => 6.0,
            Outcome::PlayerOneWins | Outcome::PlayerTwoWins => 2.0,
        }
    }

    /// Human-readable label shown after a fight.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::PlayerOneWins => "Player 1 Wins",
            Outcome::PlayerTwoWins => "Player 2 Wins",
            Outcome::Tie => "Tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parse a prediction typed by the player (case-insensitive).
impl std::str::FromStr for Outcome {
    type Err = FightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "p1" | "one" | "player 1" | "player 1 wins" | "player_one_wins" => {
                Ok(Outcome::PlayerOneWins)
            }
            "2" | "p2" | "two" | "player 2" | "player 2 wins" | "player_two_wins" => {
                Ok(Outcome::PlayerTwoWins)
            }
            "3" | "t" | "tie" | "draw" => Ok(Outcome::Tie),
            _ => Err(FightError::InvalidSelection(s.trim().to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Fighters
// ---------------------------------------------------------------------------

/// The selectable fighter roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fighter {
    Ryu,
    Ken,
    ChunLi,
    Akuma,
}

impl Fighter {
    pub const ROSTER: &'static [Fighter] = &[Fighter::Ryu, Fighter::Ken, Fighter::ChunLi, Fighter::Akuma];

    pub fn name(&self) -> &'static str {
        match self {
            Fighter::Ryu => "Ryu",
            Fighter::Ken => "Ken",
            Fighter::ChunLi => "Chun-Li",
            Fighter::Akuma => "Akuma",
        }
    }
}

impl fmt::Display for Fighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Fighter {
    type Err = FightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' ', '_'], "");
        Fighter::ROSTER
            .iter()
            .copied()
            .find(|f| f.name().to_lowercase().replace('-', "") == wanted)
            .ok_or_else(|| FightError::InvalidSelection(s.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// Bets and results
// ---------------------------------------------------------------------------

/// A wager on one outcome. Lives only for the duration of one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub amount: f64,
    pub predicted: Outcome,
}

impl Bet {
    pub fn new(amount: f64, predicted: Outcome) -> Self {
        Self { amount, predicted }
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2} on {}", self.amount, self.predicted)
    }
}

/// The drawn outcome of one fight and what it paid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FightResult {
    pub outcome: Outcome,
    pub payout: f64,
}

impl FightResult {
    pub fn is_win(&self) -> bool {
        self.payout > 0.0
    }
}

// ---------------------------------------------------------------------------
// Game state
// ---------------------------------------------------------------------------

/// Immutable snapshot of the player's state. A resolved fight produces a
/// new value instead of mutating this one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub balance: f64,
}

impl GameState {
    pub fn new(balance: f64) -> Self {
        Self { balance }
    }

    /// Whether the player can still cover any positive stake.
    pub fn can_bet(&self) -> bool {
        self.balance > 0.0
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_BALANCE)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "balance=${:.2}", self.balance)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Shown when the amount or the selection is left blank.
pub const MISSING_INPUT_MESSAGE: &str = "Please enter a bet and select a fighter!";

/// Why a wager was refused before any draw took place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BetRejection {
    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingInput,

    #[error("Invalid bet: amount is not a number")]
    NotANumber,

    #[error("Invalid bet: amount must be positive, got {0}")]
    NonPositive(f64),

    #[error("Invalid bet: insufficient balance: need ${needed:.2}, have ${available:.2}")]
    InsufficientBalance { needed: f64, available: f64 },
}

/// Domain-specific error types for FightBet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FightError {
    #[error(transparent)]
    InvalidBet(#[from] BetRejection),

    /// Holds the trimmed input; empty when nothing was chosen.
    #[error("{}", describe_selection(.0))]
    InvalidSelection(String),

    #[error("Persistence error ({key}): {message}")]
    Persistence { key: String, message: String },
}

fn describe_selection(input: &str) -> String {
    if input.is_empty() {
        MISSING_INPUT_MESSAGE.to_string()
    } else {
        format!("Invalid selection: {input:?} is not a known choice")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
