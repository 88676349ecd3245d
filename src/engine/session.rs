//! Game session, the owner of the mutable state reference.
//!
//! Loads the balance once at open, settles fights through the accountant,
//! and persists the new balance after every settlement. A failed save is
//! reported back as a warning; the in-memory balance is kept either way.

use tracing::{info, warn};

use crate::engine::accountant::{Accountant, SettlementReport};
use crate::rng::RandomSource;
use crate::storage::{BalanceStore, KeyValueStore};
use crate::types::{Bet, FightError, GameState};

/// Result of one round as seen by the front-end.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub report: SettlementReport,
    /// Set when the new balance could not be persisted.
    pub save_warning: Option<FightError>,
}

pub struct FightSession<S> {
    store: BalanceStore<S>,
    rng: Box<dyn RandomSource>,
    state: GameState,
    rounds: u64,
}

impl<S: KeyValueStore> FightSession<S> {
    /// Open a session, loading the persisted balance (or the default).
    pub fn open(store: BalanceStore<S>, rng: Box<dyn RandomSource>) -> Self {
        let state = GameState::new(store.load());
        info!(balance = state.balance, "Session opened");
        Self {
            store,
            rng,
            state,
            rounds: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn balance(&self) -> f64 {
        self.state.balance
    }

    /// Number of fights settled in this session.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn store(&self) -> &BalanceStore<S> {
        &self.store
    }

    /// Settle one bet and persist the resulting balance.
    ///
    /// Invalid bets return `Err` and leave both the balance and the store
    /// untouched. A save failure does not fail the round.
    pub fn place_bet(&mut self, bet: Bet) -> Result<RoundOutcome, FightError> {
        let (next, report) =
            Accountant::settle(&self.state, &bet, self.rounds + 1, self.rng.as_mut())?;

        self.state = next;
        self.rounds += 1;

        let save_warning = match self.store.save(next.balance) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, balance = next.balance, "Balance not persisted, continuing");
                Some(e)
            }
        };

        Ok(RoundOutcome {
            report,
            save_warning,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
