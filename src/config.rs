//! Configuration loading from TOML.
//!
//! Reads `fightbet.toml` and deserializes into strongly-typed structs.
//! Every field has a default, so a missing file or a partial file is fine.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::storage::DEFAULT_STORAGE_FILE;
use crate::types::{Fighter, DEFAULT_BALANCE};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "fightbet.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub arena: ArenaConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    /// Balance used on first run or when the stored value is unusable.
    pub initial_balance: f64,
    /// Path of the key-value file holding the balance.
    pub storage_path: String,
    /// Fixed seed for reproducible fights; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_BALANCE,
            storage_path: DEFAULT_STORAGE_FILE.to_string(),
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    pub player_one: String,
    pub player_two: String,
    /// Multiplier on effect durations. 0 plays effects instantly.
    pub animation_speed: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player_one: Fighter::Ryu.name().to_string(),
            player_two: Fighter::Ken.name().to_string(),
            animation_speed: 1.0,
        }
    }
}

impl ArenaConfig {
    /// Resolve the configured names against the roster.
    pub fn fighters(&self) -> Result<(Fighter, Fighter)> {
        let one: Fighter = self
            .player_one
            .parse()
            .with_context(|| format!("Unknown player_one fighter: {}", self.player_one))?;
        let two: Fighter = self
            .player_two
            .parse()
            .with_context(|| format!("Unknown player_two fighter: {}", self.player_two))?;
        Ok((one, two))
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.game.initial_balance.is_finite() || self.game.initial_balance < 0.0 {
            anyhow::bail!(
                "initial_balance must be a non-negative number, got {}",
                self.game.initial_balance
            );
        }
        if !self.arena.animation_speed.is_finite() || self.arena.animation_speed < 0.0 {
            anyhow::bail!(
                "animation_speed must be a non-negative number, got {}",
                self.arena.animation_speed
            );
        }
        self.arena.fighters()?;
        Ok(())
    }
}
