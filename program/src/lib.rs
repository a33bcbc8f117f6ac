#![no_std]

mod context;
mod debug;
mod instructions;
mod shared;
mod validation;

#[cfg(not(feature = "no-entrypoint"))]
mod entrypoint;

pub use shared::seeds::{BAD_PROGRAMS_SEED, LEADER_SCHEDULE_SEED};
pub use protector_interface::program::{check_id, id, ID};
