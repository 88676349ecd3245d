//! Accountant — applies a resolved fight to the game state.
//!
//! Reducer-style: takes the current immutable `GameState` and a bet,
//! returns the next state plus a settlement report. Nothing here touches
//! storage; the session persists whatever state the accountant hands back.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::engine::resolver;
use crate::rng::RandomSource;
use crate::types::{Bet, FightError, FightResult, GameState};

// ---------------------------------------------------------------------------
// Settlement report
// ---------------------------------------------------------------------------

/// Summary of one settled fight.
#[derive(Debug, Clone)]
pub struct SettlementReport {
    pub round: u64,
    pub bet: Bet,
    pub result: FightResult,
    pub balance_before: f64,
    pub balance_after: f64,
    pub timestamp: DateTime<Utc>,
}

impl SettlementReport {
    /// Net change to the balance (payout minus stake).
    pub fn net(&self) -> f64 {
        self.result.payout - self.bet.amount
    }
}

// ---------------------------------------------------------------------------
// Accountant
// ---------------------------------------------------------------------------

pub struct Accountant;

impl Accountant {
    /// Balance after a fight: stake is always taken, payout added back.
    pub fn apply(state: &GameState, bet: &Bet, result: &FightResult) -> GameState {
        GameState::new(state.balance - bet.amount + result.payout)
    }

    /// Resolve `bet` against `state` and produce the next state.
    ///
    /// On error the input state is untouched and no value is drawn.
    pub fn settle(
        state: &GameState,
        bet: &Bet,
        round: u64,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> Result<(GameState, SettlementReport), FightError> {
        let result = resolver::resolve(bet, state.balance, rng)?;
        let next = Self::apply(state, bet, &result);

        let report = SettlementReport {
            round,
            bet: *bet,
            result,
            balance_before: state.balance,
            balance_after: next.balance,
            timestamp: Utc::now(),
        };

        info!(
            round,
            bet = %bet,
            outcome = %result.outcome,
            payout = format!("${:.2}", result.payout),
            balance = format!("${:.2}", next.balance),
            "Fight settled"
        );

        Ok((next, report))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
