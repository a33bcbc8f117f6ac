use pinocchio::pubkey::Pubkey;
use static_assertions::const_assert_eq;

use crate::{instructions::InstructionTag, state::transmutable::Transmutable};

pub const UPDATE_BAD_PROGRAM_DATA_SIZE: usize = 32;

/// The instruction data shared by `AddBadProgram` and `RemoveBadProgram`.
///
/// ### Accounts
///  0. `[SIGNER]` Authority
///  1. `[WRITE]` Bad programs account
#[repr(C)]
pub struct UpdateBadProgramInstructionData {
    /// The program to flag or unflag.
    program_id: Pubkey,
}

// Safety:
//
// - Stable layout with `#[repr(C)]`.
// - `size_of` and `align_of` are checked below.
// - All bit patterns are valid.
unsafe impl Transmutable for UpdateBadProgramInstructionData {
    const LEN: usize = UPDATE_BAD_PROGRAM_DATA_SIZE;
}

const_assert_eq!(
    UPDATE_BAD_PROGRAM_DATA_SIZE,
    size_of::<UpdateBadProgramInstructionData>()
);
const_assert_eq!(align_of::<UpdateBadProgramInstructionData>(), 1);

impl UpdateBadProgramInstructionData {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    #[inline(always)]
    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Packs the instruction tag and the program id.
    ///
    /// Only `AddBadProgram` and `RemoveBadProgram` use this layout.
    #[inline(always)]
    pub fn pack(&self, tag: InstructionTag) -> [u8; 1 + UPDATE_BAD_PROGRAM_DATA_SIZE] {
        debug_assert!(matches!(
            tag,
            InstructionTag::AddBadProgram | InstructionTag::RemoveBadProgram
        ));
        // [0]: tag, [1..33]: program id
        let mut data = [0u8; 1 + UPDATE_BAD_PROGRAM_DATA_SIZE];
        data[0] = tag as u8;
        data[1..].copy_from_slice(&self.program_id);
        data
    }
}
