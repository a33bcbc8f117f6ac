use pinocchio::pubkey::Pubkey;

pub mod bad_programs;
pub mod bloom;
pub mod leader_schedule;
pub mod transmutable;

pub const U16_SIZE: usize = core::mem::size_of::<u16>();
pub const U32_SIZE: usize = core::mem::size_of::<u32>();
pub const U64_SIZE: usize = core::mem::size_of::<u64>();

pub type LeU16 = [u8; U16_SIZE];
pub type LeU32 = [u8; U32_SIZE];
pub type LeU64 = [u8; U64_SIZE];

pub const SYSTEM_PROGRAM_ID: Pubkey = [0; 32];
