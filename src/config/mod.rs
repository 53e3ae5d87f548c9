//! # Configuration Module
//!
//! Centralizes every tuning constant of the storage format. The on-disk
//! layout is a chain of derived sizes (row → cell → leaf capacity), so the
//! values live in one file and the derivations are checked at compile time.

pub mod constants;
pub use constants::*;
