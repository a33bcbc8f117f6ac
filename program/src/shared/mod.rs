//! Shared utilities and helpers for `protector` program logic.

pub mod create_pda;
pub mod seeds;
