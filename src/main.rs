//! FightBet — terminal front-end.
//!
//! Entry point. Initialises structured logging, loads configuration,
//! restores the balance from disk (or starts fresh), and runs the
//! prompt → entry effects → resolve → impact effects loop until the
//! player quits or presses Ctrl+C.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

use fightbet::config::{self, AppConfig};
use fightbet::engine::session::FightSession;
use fightbet::presentation::{self, Effect};
use fightbet::rng::SeededSource;
use fightbet::storage::{BalanceStore, JsonFileStore};
use fightbet::types::Fighter;

const BANNER: &str = r#"
 _____ _       _     _     ____       _
|  ___(_) __ _| |__ | |_  | __ )  ___| |_
| |_  | |/ _` | '_ \| __| |  _ \ / _ \ __|
|  _| | | (_| | | | | |_  | |_) |  __/ |_
|_|   |_|\__, |_| |_|\__| |____/ \___|\__|
         |___/
"#;

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = AppConfig::load_or_default(config::DEFAULT_CONFIG_FILE)?;

    let fighters = cfg.arena.fighters()?;
    info!(
        storage = %cfg.game.storage_path,
        initial_balance = cfg.game.initial_balance,
        seeded = cfg.game.seed.is_some(),
        "FightBet starting up"
    );

    let store = BalanceStore::new(
        JsonFileStore::new(&cfg.game.storage_path),
        cfg.game.initial_balance,
    );
    let rng = SeededSource::from_config(cfg.game.seed);
    let mut session = FightSession::open(store, Box::new(rng));

    println!("{BANNER}");
    println!("{}", presentation::matchup_line(fighters));
    println!("{}", presentation::balance_line(session.balance()));

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            round = play_round(&mut session, &mut input, &cfg, fighters) => {
                if !round? {
                    break;
                }
            }
            _ = &mut shutdown => {
                println!();
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    info!(
        balance = format!("${:.2}", session.balance()),
        rounds = session.rounds(),
        "FightBet shut down cleanly."
    );
    println!("{}", presentation::balance_line(session.balance()));

    Ok(())
}

/// Run one prompt → fight cycle. Returns `false` when the player quits.
async fn play_round(
    session: &mut FightSession<JsonFileStore>,
    input: &mut Input,
    cfg: &AppConfig,
    fighters: (Fighter, Fighter),
) -> Result<bool> {
    if !session.state().can_bet() {
        println!("You are out of money. Game over.");
        return Ok(false);
    }

    let Some(amount) = prompt(input, "\nEnter your bet (q to quit): ").await? else {
        return Ok(false);
    };
    if is_quit(&amount) {
        return Ok(false);
    }

    println!("{}", presentation::selection_menu());
    let Some(selection) = prompt(input, "Pick the outcome: ").await? else {
        return Ok(false);
    };
    if is_quit(&selection) {
        return Ok(false);
    }

    let bet = match presentation::parse_bet(&amount, &selection) {
        Ok(bet) => bet,
        Err(e) => {
            println!("{e}");
            return Ok(true);
        }
    };
    // Check the stake before animating; resolve() re-checks.
    if let Err(e) = fightbet::engine::resolver::validate_bet(&bet, session.balance()) {
        println!("{e}");
        return Ok(true);
    }

    let speed = cfg.arena.animation_speed;
    let render = |e: &Effect| println!("  {}", presentation::describe(e, fighters));

    presentation::play(&presentation::entry_sequence(), speed, render).await;

    let round = match session.place_bet(bet) {
        Ok(round) => round,
        Err(e) => {
            println!("{e}");
            return Ok(true);
        }
    };

    let outcome = round.report.result.outcome;
    presentation::play(&presentation::impact_sequence(outcome), speed, render).await;

    println!("{}", presentation::result_line(&round.report.result));
    println!("{}", presentation::balance_line(round.report.balance_after));
    if let Some(warning) = round.save_warning {
        warn!(error = %warning, "Balance save failed");
        println!("Warning: balance could not be saved ({warning}).");
    }

    Ok(true)
}

/// Print `label` and read one line. `None` on end of input.
async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    use std::io::Write;
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

fn is_quit(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "q" | "quit" | "exit")
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fightbet=warn"));

    let json_logging = std::env::var("FIGHTBET_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
