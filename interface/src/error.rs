use pinocchio::program_error::ProgramError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    any(test, feature = "client"),
    derive(strum_macros::FromRepr, strum_macros::EnumIter)
)]
#[repr(u8)]
pub enum ProtectorError {
    InvalidInstructionTag,
    InsufficientByteLength,
    InvalidInstructionData,
    NotEnoughAccountKeys,
    Unauthorized,
    AuthorityMustBeSigner,
    AlreadyInitializedAccount,
    NotOwnedBySystemProgram,
    InvalidAccountOwner,
    InvalidAccountDiscriminant,
    IncorrectBadProgramsAccount,
    IncorrectLeaderScheduleAccount,
    IncorrectInstructionsSysvar,
    InstructionsSysvarTooShort,
    InstructionIndexOutOfBounds,
    InvalidInstructionsSysvarData,
    InvalidBloomFilterParams,
    LeaderScheduleFull,
    UnsortedSlotRanges,
    InvalidSlotRange,
    BadProgramDetected,
    BadLeaderDetected,
}

impl From<ProtectorError> for ProgramError {
    #[inline(always)]
    fn from(e: ProtectorError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl From<ProtectorError> for &'static str {
    fn from(value: ProtectorError) -> Self {
        match value {
            ProtectorError::InvalidInstructionTag => "Invalid instruction tag",
            ProtectorError::InsufficientByteLength => "Not enough bytes passed",
            ProtectorError::InvalidInstructionData => "Invalid instruction data",
            ProtectorError::NotEnoughAccountKeys => "Not enough account keys passed",
            ProtectorError::Unauthorized => {
                "Account is not authorized to execute this instruction"
            }
            ProtectorError::AuthorityMustBeSigner => "The authority account must sign",
            ProtectorError::AlreadyInitializedAccount => "Account is already initialized",
            ProtectorError::NotOwnedBySystemProgram => "Account is not owned by the system program",
            ProtectorError::InvalidAccountOwner => "Account is not owned by the protector program",
            ProtectorError::InvalidAccountDiscriminant => "Invalid account discriminant",
            ProtectorError::IncorrectBadProgramsAccount => "Incorrect bad programs account",
            ProtectorError::IncorrectLeaderScheduleAccount => "Incorrect leader schedule account",
            ProtectorError::IncorrectInstructionsSysvar => "Incorrect instructions sysvar account",
            ProtectorError::InstructionsSysvarTooShort => "Instructions sysvar data is too short",
            ProtectorError::InstructionIndexOutOfBounds => "Instruction index out of bounds",
            ProtectorError::InvalidInstructionsSysvarData => "Malformed instructions sysvar data",
            ProtectorError::InvalidBloomFilterParams => "Deserialize filter failure",
            ProtectorError::LeaderScheduleFull => "The leader schedule has no free slot ranges",
            ProtectorError::UnsortedSlotRanges => "Slot ranges must be sorted and disjoint",
            ProtectorError::InvalidSlotRange => "Slot range start is after its end",
            ProtectorError::BadProgramDetected => "Transaction invokes a flagged program",
            ProtectorError::BadLeaderDetected => "Current slot leader is flagged",
        }
    }
}

#[cfg(not(target_os = "solana"))]
impl core::fmt::Display for ProtectorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = (*self).into();
        write!(f, "{:?}: {}", self, msg)
    }
}

pub type ProtectorResult = Result<(), ProtectorError>;

#[cfg(test)]
mod tests {
    use pinocchio::program_error::ProgramError;
    use strum::IntoEnumIterator;

    use super::ProtectorError;

    #[test]
    fn error_codes_round_trip_through_program_error() {
        for error in ProtectorError::iter() {
            let ProgramError::Custom(code) = ProgramError::from(error) else {
                panic!("{error:?} should map to a custom program error");
            };
            assert_eq!(ProtectorError::from_repr(code as u8), Some(error));
        }
    }

    #[test]
    fn unauthorized_message() {
        let msg: &'static str = ProtectorError::Unauthorized.into();
        assert_eq!(msg, "Account is not authorized to execute this instruction");
    }
}
