//! Client-side utilities for interacting with the `protector` program.
//!
//! Includes the RPC provider, the typed program handle, instruction builders, PDA derivations and
//! mollusk test helpers.

pub mod instructions;
pub mod logs;
pub mod mollusk_helpers;
pub mod pda;
pub mod program;
pub mod provider;
pub mod transactions;

pub use logs::LogColor;
pub use program::{
    workspace,
    Program,
    RequestBuilder,
};
pub use provider::Provider;
