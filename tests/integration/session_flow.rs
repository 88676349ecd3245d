//! End-to-end session flows: load, bet, persist, restart.

use fightbet::engine::session::FightSession;
use fightbet::presentation;
use fightbet::rng::{RandomSource, SeededSource};
use fightbet::storage::{BalanceStore, JsonFileStore, BALANCE_KEY};
use fightbet::types::{Bet, BetRejection, FightError, Outcome};

use crate::mock_store::MockStore;

fn scripted(values: &[f64]) -> Box<dyn RandomSource> {
    let mut iter = values.to_vec().into_iter();
    Box::new(move || iter.next().expect("script exhausted"))
}

fn session(store: MockStore, values: &[f64]) -> FightSession<MockStore> {
    FightSession::open(BalanceStore::new(store, 1000.0), scripted(values))
}

// -- Scenarios --

#[test]
fn test_player_one_scenario() {
    let store = MockStore::new();
    let mut s = session(store.clone(), &[0.1]);
    let round = s.place_bet(Bet::new(100.0, Outcome::PlayerOneWins)).unwrap();

    assert_eq!(round.report.result.outcome, Outcome::PlayerOneWins);
    assert_eq!(round.report.result.payout, 200.0);
    assert_eq!(s.balance(), 1100.0);
    assert_eq!(store.raw(BALANCE_KEY).as_deref(), Some("1100"));
}

#[test]
fn test_tie_scenario() {
    let store = MockStore::new();
    let mut s = session(store.clone(), &[0.95]);
    let round = s.place_bet(Bet::new(100.0, Outcome::Tie)).unwrap();

    assert_eq!(round.report.result.outcome, Outcome::Tie);
    assert_eq!(round.report.result.payout, 600.0);
    assert_eq!(s.balance(), 1500.0);
    assert_eq!(
        presentation::result_line(&round.report.result),
        "Tie! You won $600.00!"
    );
}

#[test]
fn test_losing_scenario() {
    let store = MockStore::new();
    let mut s = session(store.clone(), &[0.99]);
    let round = s.place_bet(Bet::new(100.0, Outcome::PlayerTwoWins)).unwrap();

    assert_eq!(round.report.result.outcome, Outcome::Tie);
    assert_eq!(round.report.result.payout, 0.0);
    assert_eq!(s.balance(), 900.0);
    assert_eq!(store.raw(BALANCE_KEY).as_deref(), Some("900"));
}

// -- Validation --

#[test]
fn test_rejected_bets_do_not_touch_store() {
    let store = MockStore::new();
    let mut s = session(store.clone(), &[]);

    for amount in [0.0, -10.0, 1000.5] {
        let err = s.place_bet(Bet::new(amount, Outcome::PlayerOneWins)).unwrap_err();
        assert!(matches!(err, FightError::InvalidBet(_)), "{amount}: {err:?}");
    }
    let err = presentation::parse_bet("100", "nobody").unwrap_err();
    assert!(matches!(err, FightError::InvalidSelection(_)));

    assert_eq!(s.balance(), 1000.0);
    assert_eq!(s.rounds(), 0);
    assert!(store.writes().is_empty());
}

#[test]
fn test_bet_limited_by_current_balance() {
    let store = MockStore::new();
    let mut s = session(store, &[0.99]);
    s.place_bet(Bet::new(600.0, Outcome::PlayerOneWins)).unwrap();
    assert_eq!(s.balance(), 400.0);

    let err = s.place_bet(Bet::new(500.0, Outcome::PlayerOneWins)).unwrap_err();
    assert_eq!(
        err,
        FightError::InvalidBet(BetRejection::InsufficientBalance {
            needed: 500.0,
            available: 400.0,
        })
    );
}

// -- Persistence --

#[test]
fn test_load_failure_uses_default() {
    let store = MockStore::with_entry(BALANCE_KEY, "250");
    store.fail_reads("storage locked");
    let s = session(store, &[]);
    assert_eq!(s.balance(), 1000.0);
}

#[test]
fn test_save_failure_is_a_warning() {
    let store = MockStore::new();
    store.fail_writes("quota exceeded");
    let mut s = session(store.clone(), &[0.1, 0.1]);

    let round = s.place_bet(Bet::new(100.0, Outcome::PlayerOneWins)).unwrap();
    assert_eq!(s.balance(), 1100.0);
    assert!(matches!(round.save_warning, Some(FightError::Persistence { .. })));

    // play continues and the next save goes through once storage recovers
    store.clear_errors();
    let round = s.place_bet(Bet::new(100.0, Outcome::PlayerOneWins)).unwrap();
    assert!(round.save_warning.is_none());
    assert_eq!(store.raw(BALANCE_KEY).as_deref(), Some("1200"));
}

#[test]
fn test_balance_survives_restart() {
    let mut path = std::env::temp_dir();
    path.push(format!("fightbet_it_{}.json", uuid::Uuid::new_v4()));

    {
        let store = BalanceStore::new(JsonFileStore::new(&path), 1000.0);
        let mut s = FightSession::open(store, scripted(&[0.95]));
        s.place_bet(Bet::new(100.0, Outcome::Tie)).unwrap();
        assert_eq!(s.balance(), 1500.0);
    }

    let store = BalanceStore::new(JsonFileStore::new(&path), 1000.0);
    let s = FightSession::open(store, scripted(&[]));
    assert_eq!(s.balance(), 1500.0);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_corrupt_store_file_is_replaced_by_next_save() {
    let mut path = std::env::temp_dir();
    path.push(format!("fightbet_it_{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, "{ truncated").unwrap();

    {
        let store = BalanceStore::new(JsonFileStore::new(&path), 1000.0);
        let mut s = FightSession::open(store, scripted(&[0.1, 0.1, 0.1]));
        assert_eq!(s.balance(), 1000.0);
        for _ in 0..3 {
            let round = s.place_bet(Bet::new(100.0, Outcome::PlayerOneWins)).unwrap();
            assert!(round.save_warning.is_none());
        }
        assert_eq!(s.balance(), 1300.0);
    }

    let store = BalanceStore::new(JsonFileStore::new(&path), 1000.0);
    let s = FightSession::open(store, scripted(&[]));
    assert_eq!(s.balance(), 1300.0);

    std::fs::remove_file(&path).unwrap();
}

// -- Accumulation --

#[test]
fn test_balance_equals_initial_plus_net() {
    let store = MockStore::new();
    let mut s = FightSession::open(
        BalanceStore::new(store.clone(), 1000.0),
        Box::new(SeededSource::from_seed(2024)),
    );

    let predictions = [Outcome::PlayerOneWins, Outcome::PlayerTwoWins, Outcome::Tie];
    let mut expected = 1000.0;
    for i in 0..50 {
        if s.balance() < 1.0 {
            break;
        }
        let bet = Bet::new(1.0, predictions[i % 3]);
        let round = s.place_bet(bet).unwrap();
        expected += round.report.result.payout - bet.amount;
        assert_eq!(round.report.balance_after, s.balance());
    }

    assert_eq!(s.balance(), expected);
    assert_eq!(store.writes().len() as u64, s.rounds());
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let play = |seed: u64| {
        let mut s = FightSession::open(
            BalanceStore::new(MockStore::new(), 1000.0),
            Box::new(SeededSource::from_seed(seed)),
        );
        (0..20)
            .map(|_| {
                s.place_bet(Bet::new(10.0, Outcome::Tie))
                    .unwrap()
                    .report
                    .result
                    .outcome
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(play(7), play(7));
}
