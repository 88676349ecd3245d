//! Outcome resolver — weighted draw and payout rule.
//!
//! Validates a wager against the current balance, draws one outcome by
//! inverse-CDF sampling over the fixed weight table, and prices the result.
//! Pure apart from consuming one value from the random source.

use tracing::debug;

use crate::rng::RandomSource;
use crate::types::{Bet, BetRejection, FightError, FightResult, Outcome};

/// Total of the weight table in tenths of a percent.
const WEIGHT_SCALE: u32 = 1000;

/// Check a wager before any draw.
pub fn validate_bet(bet: &Bet, balance: f64) -> Result<(), FightError> {
    if !bet.amount.is_finite() {
        return Err(BetRejection::NotANumber.into());
    }
    if bet.amount <= 0.0 {
        return Err(BetRejection::NonPositive(bet.amount).into());
    }
    if bet.amount > balance {
        return Err(BetRejection::InsufficientBalance {
            needed: bet.amount,
            available: balance,
        }
        .into());
    }
    Ok(())
}

/// Map a uniform value in `[0, 1)` to an outcome.
///
/// Walks the table accumulating weights and picks the first outcome whose
/// cumulative upper bound is strictly greater than `unit`. Bounds are derived
/// from integer tenths so they land exactly on 0.458 and 0.904. Values that
/// fall in no bucket resolve to `PlayerOneWins`.
pub fn draw_outcome(unit: f64) -> Outcome {
    let mut cumulative = 0u32;
    for outcome in Outcome::ALL {
        cumulative += outcome.weight_tenths();
        if unit < cumulative as f64 / WEIGHT_SCALE as f64 {
            return outcome;
        }
    }
    Outcome::PlayerOneWins
}

/// Amount returned for a stake given the predicted and drawn outcomes.
pub fn payout(amount: f64, predicted: Outcome, actual: Outcome) -> f64 {
    if predicted == actual {
        amount * actual.payout_multiplier()
    } else {
        0.0
    }
}

/// Resolve one fight.
///
/// Fails with `InvalidBet` (and draws nothing) when the stake is not a
/// positive number or exceeds `balance`.
pub fn resolve(
    bet: &Bet,
    balance: f64,
    rng: &mut (impl RandomSource + ?Sized),
) -> Result<FightResult, FightError> {
    validate_bet(bet, balance)?;

    let unit = rng.next_unit();
    let outcome = draw_outcome(unit);
    let payout = payout(bet.amount, bet.predicted, outcome);

    debug!(
        unit,
        predicted = %bet.predicted,
        outcome = %outcome,
        stake = bet.amount,
        payout,
        "Fight resolved"
    );

    Ok(FightResult { outcome, payout })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
