use static_assertions::const_assert_eq;

use crate::{
    error::ProtectorError,
    state::{
        leader_schedule::{SlotRange, SLOT_RANGE_SIZE},
        transmutable::{load, load_slice, Transmutable},
        LeU16,
    },
};

pub const SET_LEADER_SCHEDULE_HEADER_SIZE: usize = 3;

/// The number of slot ranges that comfortably fit in a single transaction alongside the
/// signature, account keys and blockhash.
pub const MAX_SLOT_RANGES_PER_INSTRUCTION: usize = 48;

/// The fixed-size prefix of the `SetLeaderSchedule` instruction data, followed by `num_ranges`
/// packed [`SlotRange`]s.
///
/// ### Accounts
///  0. `[SIGNER]` Authority
///  1. `[WRITE]` Leader schedule account
#[repr(C)]
pub struct SetLeaderScheduleHeader {
    /// `1` to clear the stored ranges before appending, `0` to append.
    reset: u8,
    /// The u16 number of slot ranges that follow as LE bytes.
    num_ranges: LeU16,
}

// Safety:
//
// - Stable layout with `#[repr(C)]`.
// - `size_of` and `align_of` are checked below.
// - All bit patterns are valid; `reset` is validated when unpacked.
unsafe impl Transmutable for SetLeaderScheduleHeader {
    const LEN: usize = SET_LEADER_SCHEDULE_HEADER_SIZE;
}

const_assert_eq!(
    SET_LEADER_SCHEDULE_HEADER_SIZE,
    size_of::<SetLeaderScheduleHeader>()
);
const_assert_eq!(align_of::<SetLeaderScheduleHeader>(), 1);

pub struct SetLeaderScheduleArgs<'a> {
    pub reset: bool,
    pub ranges: &'a [SlotRange],
}

impl<'a> SetLeaderScheduleArgs<'a> {
    /// Unpacks the instruction data that follows the instruction tag.
    pub fn unpack(instruction_data: &'a [u8]) -> Result<Self, ProtectorError> {
        if instruction_data.len() < SET_LEADER_SCHEDULE_HEADER_SIZE {
            return Err(ProtectorError::InsufficientByteLength);
        }
        let (header_bytes, range_bytes) =
            instruction_data.split_at(SET_LEADER_SCHEDULE_HEADER_SIZE);
        // Safety: All bit patterns are valid.
        let header = unsafe { load::<SetLeaderScheduleHeader>(header_bytes) }?;

        let reset = match header.reset {
            0 => false,
            1 => true,
            _ => return Err(ProtectorError::InvalidInstructionData),
        };

        let num_ranges = u16::from_le_bytes(header.num_ranges) as usize;
        if range_bytes.len() != num_ranges * SLOT_RANGE_SIZE {
            return Err(ProtectorError::InsufficientByteLength);
        }
        // Safety: All bit patterns are valid.
        let ranges = unsafe { load_slice::<SlotRange>(range_bytes) }?;

        Ok(Self { reset, ranges })
    }

    /// Packs the instruction tag, header and ranges.
    #[cfg(feature = "std")]
    pub fn pack(&self) -> std::vec::Vec<u8> {
        use crate::instructions::InstructionTag;

        let num_ranges = self.ranges.len() as u16;
        let mut data = std::vec::Vec::with_capacity(
            1 + SET_LEADER_SCHEDULE_HEADER_SIZE + SLOT_RANGE_SIZE * self.ranges.len(),
        );
        data.push(InstructionTag::SetLeaderSchedule as u8);
        data.push(self.reset as u8);
        data.extend_from_slice(&num_ranges.to_le_bytes());
        for range in self.ranges {
            data.extend_from_slice(range.as_bytes());
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_ranges() {
        let mut data = [0u8; SET_LEADER_SCHEDULE_HEADER_SIZE + 2 * SLOT_RANGE_SIZE];
        data[0] = 1;
        data[1..3].copy_from_slice(&2u16.to_le_bytes());
        data[3..11].copy_from_slice(&10u64.to_le_bytes());
        data[11..19].copy_from_slice(&13u64.to_le_bytes());
        data[19..27].copy_from_slice(&20u64.to_le_bytes());
        data[27..35].copy_from_slice(&23u64.to_le_bytes());

        let args = SetLeaderScheduleArgs::unpack(&data).unwrap();
        assert!(args.reset);
        assert_eq!(args.ranges, &[SlotRange::new(10, 13), SlotRange::new(20, 23)]);
    }

    #[test]
    fn unpack_rejects_bad_data() {
        assert!(matches!(
            SetLeaderScheduleArgs::unpack(&[0, 0]),
            Err(ProtectorError::InsufficientByteLength)
        ));
        assert!(matches!(
            SetLeaderScheduleArgs::unpack(&[2, 0, 0]),
            Err(ProtectorError::InvalidInstructionData)
        ));
        // Claims one range but carries none.
        assert!(matches!(
            SetLeaderScheduleArgs::unpack(&[0, 1, 0]),
            Err(ProtectorError::InsufficientByteLength)
        ));
    }

    #[test]
    fn empty_append_is_valid() {
        let args = SetLeaderScheduleArgs::unpack(&[0, 0, 0]).unwrap();
        assert!(!args.reset);
        assert!(args.ranges.is_empty());
    }
}
