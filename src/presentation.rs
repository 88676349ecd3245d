//! Terminal presentation: parsing player input and rendering a fight.
//!
//! A fight plays as three strictly sequential steps: the entry sequence,
//! the synchronous resolution call, then the sound cue and impact sequence.
//! Effects are plain data so the order can be checked without a terminal.

use std::time::Duration;

use crate::types::{Bet, BetRejection, FightError, FightResult, Fighter, Outcome};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Parse the typed stake. Blank text is `MissingInput`, anything else that
/// is not a finite number is `NotANumber`.
pub fn parse_amount(text: &str) -> Result<f64, FightError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(BetRejection::MissingInput.into());
    }
    text.trim_start_matches('$')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(FightError::InvalidBet(BetRejection::NotANumber))
}

/// Build a bet from the two input fields. The amount is checked first.
pub fn parse_bet(amount: &str, selection: &str) -> Result<Bet, FightError> {
    let amount = parse_amount(amount)?;
    let predicted: Outcome = selection.parse()?;
    Ok(Bet::new(amount, predicted))
}

/// Menu line listing the choices and their odds.
pub fn selection_menu() -> String {
    Outcome::ALL
        .iter()
        .enumerate()
        .map(|(i, o)| {
            format!(
                "[{}] {} ({:.1}%, pays {}x)",
                i + 1,
                o.label(),
                o.chance_pct(),
                o.payout_multiplier()
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Sound played once the fight is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Hit,
    Tie,
}

impl Cue {
    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Tie => Cue::Tie,
            Outcome::PlayerOneWins | Outcome::PlayerTwoWins => Cue::Hit,
        }
    }

    pub fn sound(&self) -> &'static str {
        match self {
            Cue::Hit => "*THWACK*",
            Cue::Tie => "*clang* ... *clang*",
        }
    }
}

/// Which side of the arena an effect moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

/// One presentation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Tween a fighter's horizontal offset to `to` over `duration`.
    Move {
        side: Side,
        to: i32,
        duration: Duration,
    },
    Sound(Cue),
}

impl Effect {
    fn step(side: Side, to: i32, millis: u64) -> Self {
        Effect::Move {
            side,
            to,
            duration: Duration::from_millis(millis),
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Effect::Move { duration, .. } => *duration,
            Effect::Sound(_) => Duration::ZERO,
        }
    }
}

/// Lunges played before the fight is resolved.
pub fn entry_sequence() -> Vec<Effect> {
    vec![
        Effect::step(Side::PlayerOne, -50, 500),
        Effect::step(Side::PlayerOne, 0, 200),
        Effect::step(Side::PlayerTwo, 50, 500),
        Effect::step(Side::PlayerTwo, 0, 200),
    ]
}

/// Cue plus recoil played after the fight is resolved.
pub fn impact_sequence(outcome: Outcome) -> Vec<Effect> {
    vec![
        Effect::Sound(Cue::for_outcome(outcome)),
        Effect::step(Side::PlayerOne, -20, 200),
        Effect::step(Side::PlayerOne, 0, 200),
        Effect::step(Side::PlayerTwo, 20, 200),
        Effect::step(Side::PlayerTwo, 0, 200),
    ]
}

/// Text rendering of one effect, given the two fighters on screen.
pub fn describe(effect: &Effect, fighters: (Fighter, Fighter)) -> String {
    match effect {
        Effect::Move { side, to, .. } => {
            let name = match side {
                Side::PlayerOne => fighters.0,
                Side::PlayerTwo => fighters.1,
            };
            match to {
                0 => format!("{name} steps back"),
                t if t.abs() >= 50 => format!("{name} lunges!"),
                _ => format!("{name} staggers"),
            }
        }
        Effect::Sound(cue) => cue.sound().to_string(),
    }
}

/// Play effects one after another, scaling each delay by `speed`.
pub async fn play<F>(effects: &[Effect], speed: f64, mut render: F)
where
    F: FnMut(&Effect),
{
    for effect in effects {
        render(effect);
        let delay = effect.duration().mul_f64(speed);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

pub fn balance_line(balance: f64) -> String {
    format!("Balance: ${balance:.2}")
}

pub fn result_line(result: &FightResult) -> String {
    if result.payout > 0.0 {
        format!("{}! You won ${:.2}!", result.outcome, result.payout)
    } else {
        format!("{}! You lost your bet.", result.outcome)
    }
}

pub fn matchup_line(fighters: (Fighter, Fighter)) -> String {
    format!("{} (Player 1) vs {} (Player 2)", fighters.0, fighters.1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
