//! Core engine — resolve a bet, settle it, persist the balance.

pub mod resolver;
pub mod accountant;
pub mod session;
