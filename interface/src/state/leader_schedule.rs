use core::cmp::Ordering;

use pinocchio::pubkey::Pubkey;
use static_assertions::const_assert_eq;

use crate::{
    error::{ProtectorError, ProtectorResult},
    state::{
        transmutable::{load, load_mut, load_slice, load_slice_mut, Transmutable},
        LeU32, LeU64, U32_SIZE,
    },
};

pub const LEADER_SCHEDULE_HEADER_SIZE: usize = 48;
pub const LEADER_SCHEDULE_ACCOUNT_DISCRIMINANT: u64 = 0x1ead_e25c_4ed0_0002u64;
pub const SLOT_RANGE_SIZE: usize = 16;

/// The maximum number of flagged slot ranges a leader schedule account can hold.
pub const MAX_SLOT_RANGES: usize = 512;

pub const LEADER_SCHEDULE_ACCOUNT_SIZE: usize =
    LEADER_SCHEDULE_HEADER_SIZE + SLOT_RANGE_SIZE * MAX_SLOT_RANGES;

/// An inclusive range of slots led by a single flagged validator.
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotRange {
    start: LeU64,
    end: LeU64,
}

// Safety:
//
// - Stable layout with `#[repr(C)]`.
// - `size_of` and `align_of` are checked below.
// - All bit patterns are valid.
unsafe impl Transmutable for SlotRange {
    const LEN: usize = SLOT_RANGE_SIZE;
}

const_assert_eq!(SLOT_RANGE_SIZE, size_of::<SlotRange>());
const_assert_eq!(align_of::<SlotRange>(), 1);

impl SlotRange {
    #[inline(always)]
    pub const fn new(start: u64, end: u64) -> Self {
        SlotRange {
            start: start.to_le_bytes(),
            end: end.to_le_bytes(),
        }
    }

    #[inline(always)]
    pub fn start(&self) -> u64 {
        u64::from_le_bytes(self.start)
    }

    #[inline(always)]
    pub fn end(&self) -> u64 {
        u64::from_le_bytes(self.end)
    }

    #[inline(always)]
    pub fn contains(&self, slot: u64) -> bool {
        self.start() <= slot && slot <= self.end()
    }

    /// Orders the range relative to a slot, treating any slot inside the range as equal.
    #[inline(always)]
    fn cmp_slot(&self, slot: u64) -> Ordering {
        if self.end() < slot {
            Ordering::Less
        } else if self.start() > slot {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

#[repr(C)]
#[derive(Clone, Debug)]
pub struct LeaderScheduleHeader {
    /// The u64 account discriminant as LE bytes.
    discriminant: LeU64,
    /// The only account allowed to update the schedule.
    pub authority: Pubkey,
    /// The bump for the leader schedule PDA.
    pub bump: u8,
    _padding: [u8; 3],
    /// The u32 number of live slot ranges as LE bytes.
    num_ranges: LeU32,
}

// Safety:
//
// - Stable layout with `#[repr(C)]`.
// - `size_of` and `align_of` are checked below.
// - All bit patterns are valid.
unsafe impl Transmutable for LeaderScheduleHeader {
    const LEN: usize = LEADER_SCHEDULE_HEADER_SIZE;
}

const_assert_eq!(LEADER_SCHEDULE_HEADER_SIZE, size_of::<LeaderScheduleHeader>());
const_assert_eq!(align_of::<LeaderScheduleHeader>(), 1);

impl LeaderScheduleHeader {
    pub fn init(authority: &Pubkey, bump: u8) -> Self {
        LeaderScheduleHeader {
            discriminant: LEADER_SCHEDULE_ACCOUNT_DISCRIMINANT.to_le_bytes(),
            authority: *authority,
            bump,
            _padding: [0; 3],
            num_ranges: [0; U32_SIZE],
        }
    }

    #[inline(always)]
    pub fn verify_discriminant(&self) -> ProtectorResult {
        if self.discriminant() != LEADER_SCHEDULE_ACCOUNT_DISCRIMINANT {
            return Err(ProtectorError::InvalidAccountDiscriminant);
        }
        Ok(())
    }

    #[inline(always)]
    pub fn discriminant(&self) -> u64 {
        u64::from_le_bytes(self.discriminant)
    }

    #[inline(always)]
    pub fn num_ranges(&self) -> u32 {
        u32::from_le_bytes(self.num_ranges)
    }

    #[inline(always)]
    fn set_num_ranges(&mut self, num_ranges: u32) {
        self.num_ranges = num_ranges.to_le_bytes();
    }
}

pub struct LeaderSchedule;

pub struct LeaderScheduleRef<'a> {
    pub header: &'a LeaderScheduleHeader,
    ranges: &'a [SlotRange],
}

pub struct LeaderScheduleRefMut<'a> {
    pub header: &'a mut LeaderScheduleHeader,
    ranges: &'a mut [SlotRange],
}

impl LeaderSchedule {
    pub fn from_bytes(data: &[u8]) -> Result<LeaderScheduleRef<'_>, ProtectorError> {
        if data.len() != LEADER_SCHEDULE_ACCOUNT_SIZE {
            return Err(ProtectorError::InsufficientByteLength);
        }
        let (header_bytes, range_bytes) = data.split_at(LEADER_SCHEDULE_HEADER_SIZE);
        // Safety: All bit patterns are valid for both the header and the slot ranges.
        let header = unsafe { load::<LeaderScheduleHeader>(header_bytes) }?;
        header.verify_discriminant()?;
        let ranges = unsafe { load_slice::<SlotRange>(range_bytes) }?;
        if header.num_ranges() as usize > MAX_SLOT_RANGES {
            return Err(ProtectorError::LeaderScheduleFull);
        }

        Ok(LeaderScheduleRef { header, ranges })
    }

    pub fn from_bytes_mut(data: &mut [u8]) -> Result<LeaderScheduleRefMut<'_>, ProtectorError> {
        if data.len() != LEADER_SCHEDULE_ACCOUNT_SIZE {
            return Err(ProtectorError::InsufficientByteLength);
        }
        let (header_bytes, range_bytes) = data.split_at_mut(LEADER_SCHEDULE_HEADER_SIZE);
        // Safety: All bit patterns are valid for both the header and the slot ranges.
        let header = unsafe { load_mut::<LeaderScheduleHeader>(header_bytes) }?;
        header.verify_discriminant()?;
        let ranges = unsafe { load_slice_mut::<SlotRange>(range_bytes) }?;
        if header.num_ranges() as usize > MAX_SLOT_RANGES {
            return Err(ProtectorError::LeaderScheduleFull);
        }

        Ok(LeaderScheduleRefMut { header, ranges })
    }

    pub fn initialize<'a>(
        // This data should only have been initialized with zeroes, nothing else.
        zeroed_account_data: &'a mut [u8],
        authority: &Pubkey,
        bump: u8,
    ) -> Result<LeaderScheduleRefMut<'a>, ProtectorError> {
        if zeroed_account_data.len() != LEADER_SCHEDULE_ACCOUNT_SIZE {
            return Err(ProtectorError::InsufficientByteLength);
        }
        let (header_bytes, range_bytes) =
            zeroed_account_data.split_at_mut(LEADER_SCHEDULE_HEADER_SIZE);
        // Safety: All bit patterns are valid for both the header and the slot ranges.
        let header = unsafe { load_mut::<LeaderScheduleHeader>(header_bytes) }?;
        *header = LeaderScheduleHeader::init(authority, bump);
        let ranges = unsafe { load_slice_mut::<SlotRange>(range_bytes) }?;

        Ok(LeaderScheduleRefMut { header, ranges })
    }
}

impl<'a> LeaderScheduleRef<'a> {
    /// The live, sorted slot ranges.
    #[inline(always)]
    pub fn ranges(&self) -> &'a [SlotRange] {
        let ranges: &'a [SlotRange] = self.ranges;
        &ranges[..self.header.num_ranges() as usize]
    }

    /// Returns `true` if `slot` lies within any flagged slot range.
    #[inline(always)]
    pub fn contains(&self, slot: u64) -> bool {
        self.ranges()
            .binary_search_by(|range| range.cmp_slot(slot))
            .is_ok()
    }
}

impl LeaderScheduleRefMut<'_> {
    #[inline(always)]
    pub fn ranges(&self) -> &[SlotRange] {
        &self.ranges[..self.header.num_ranges() as usize]
    }

    /// Zeroes out all live ranges and resets the range count.
    pub fn clear(&mut self) {
        let num_ranges = self.header.num_ranges() as usize;
        self.ranges[..num_ranges].fill(SlotRange::new(0, 0));
        self.header.set_num_ranges(0);
    }

    /// Appends new ranges after the existing ones.
    ///
    /// Every range must satisfy `start <= end`, and each range must start strictly after the end
    /// of the range before it, including the last range already stored. Nothing is written if any
    /// range fails validation.
    pub fn append(&mut self, new_ranges: &[SlotRange]) -> ProtectorResult {
        let num_ranges = self.header.num_ranges() as usize;
        let new_len = num_ranges
            .checked_add(new_ranges.len())
            .filter(|len| *len <= MAX_SLOT_RANGES)
            .ok_or(ProtectorError::LeaderScheduleFull)?;

        let mut prev_end = self.ranges().last().map(SlotRange::end);
        for range in new_ranges {
            if range.start() > range.end() {
                return Err(ProtectorError::InvalidSlotRange);
            }
            if prev_end.is_some_and(|end| range.start() <= end) {
                return Err(ProtectorError::UnsortedSlotRanges);
            }
            prev_end = Some(range.end());
        }

        self.ranges[num_ranges..new_len].copy_from_slice(new_ranges);
        self.header.set_num_ranges(new_len as u32);

        Ok(())
    }
}
