use pinocchio::program_error::ProgramError;

use crate::error::ProtectorError;

pub mod set_leader_schedule;
pub mod update_bad_program;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    any(test, feature = "client"),
    derive(strum_macros::FromRepr, strum_macros::EnumIter, strum_macros::Display)
)]
pub enum InstructionTag {
    Initialize,
    InitializeBadPrograms,
    AddBadProgram,
    RemoveBadProgram,
    InitializeLeaderSchedule,
    SetLeaderSchedule,
    Inspect,
}

impl TryFrom<u8> for InstructionTag {
    type Error = ProgramError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            // SAFETY: A valid enum variant is guaranteed with the match pattern.
            // All variants are checked in the exhaustive instruction tag test.
            0..7 => Ok(unsafe { core::mem::transmute::<u8, Self>(value) }),
            _ => Err(ProtectorError::InvalidInstructionTag.into()),
        }
    }
}
