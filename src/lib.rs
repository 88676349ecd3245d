//! FightBet — single-player fight wagering game
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod rng;
pub mod engine;
pub mod storage;
pub mod presentation;
