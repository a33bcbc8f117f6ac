use pinocchio::pubkey::Pubkey;
use static_assertions::const_assert_eq;

use crate::{
    error::{ProtectorError, ProtectorResult},
    state::{
        bloom::{
            CountingBloomFilter, CountingBloomFilterMut, DEFAULT_NUM_COUNTERS, DEFAULT_NUM_HASHES,
        },
        transmutable::{load, load_mut, Transmutable},
        LeU32, LeU64, U32_SIZE,
    },
};

pub const BAD_PROGRAMS_HEADER_SIZE: usize = 52;
pub const BAD_PROGRAMS_ACCOUNT_DISCRIMINANT: u64 = 0xbadb_adba_dbad_0001u64;

/// The total account size of a bad programs account with the default filter parameters.
pub const BAD_PROGRAMS_ACCOUNT_SIZE: usize =
    BAD_PROGRAMS_HEADER_SIZE + DEFAULT_NUM_COUNTERS as usize;

#[repr(C)]
#[derive(Clone, Debug)]
pub struct BadProgramsHeader {
    /// The u64 account discriminant as LE bytes.
    discriminant: LeU64,
    /// The only account allowed to add or remove bad programs.
    pub authority: Pubkey,
    /// The bump for the bad programs PDA.
    pub bump: u8,
    /// The number of hash functions the filter uses.
    num_hashes: u8,
    /// The u32 number of one byte counters that follow the header as LE bytes.
    num_counters: LeU32,
    /// The u32 number of programs currently flagged as LE bytes.
    num_entries: LeU32,
    _padding: [u8; 2],
}

// Safety:
//
// - Stable layout with `#[repr(C)]`.
// - `size_of` and `align_of` are checked below.
// - All bit patterns are valid.
unsafe impl Transmutable for BadProgramsHeader {
    const LEN: usize = BAD_PROGRAMS_HEADER_SIZE;
}

const_assert_eq!(BAD_PROGRAMS_HEADER_SIZE, size_of::<BadProgramsHeader>());
const_assert_eq!(align_of::<BadProgramsHeader>(), 1);

impl BadProgramsHeader {
    pub fn init(authority: &Pubkey, bump: u8, num_hashes: u8, num_counters: u32) -> Self {
        BadProgramsHeader {
            discriminant: BAD_PROGRAMS_ACCOUNT_DISCRIMINANT.to_le_bytes(),
            authority: *authority,
            bump,
            num_hashes,
            num_counters: num_counters.to_le_bytes(),
            num_entries: [0; U32_SIZE],
            _padding: [0; 2],
        }
    }

    #[inline(always)]
    pub fn verify_discriminant(&self) -> ProtectorResult {
        if self.discriminant() != BAD_PROGRAMS_ACCOUNT_DISCRIMINANT {
            return Err(ProtectorError::InvalidAccountDiscriminant);
        }
        Ok(())
    }

    #[inline(always)]
    pub fn discriminant(&self) -> u64 {
        u64::from_le_bytes(self.discriminant)
    }

    #[inline(always)]
    pub fn num_hashes(&self) -> u8 {
        self.num_hashes
    }

    #[inline(always)]
    pub fn num_counters(&self) -> u32 {
        u32::from_le_bytes(self.num_counters)
    }

    #[inline(always)]
    pub fn num_entries(&self) -> u32 {
        u32::from_le_bytes(self.num_entries)
    }

    #[inline(always)]
    pub fn increment_num_entries(&mut self) {
        self.num_entries = self.num_entries().saturating_add(1).to_le_bytes();
    }

    #[inline(always)]
    pub fn decrement_num_entries(&mut self) {
        self.num_entries = self.num_entries().saturating_sub(1).to_le_bytes();
    }
}

/// The bad programs account: a header followed by the counting bloom filter's counters.
pub struct BadPrograms;

pub struct BadProgramsRef<'a> {
    pub header: &'a BadProgramsHeader,
    pub counters: &'a [u8],
}

pub struct BadProgramsRefMut<'a> {
    pub header: &'a mut BadProgramsHeader,
    pub counters: &'a mut [u8],
}

impl BadPrograms {
    /// Loads and validates a bad programs account from its raw account data.
    pub fn from_bytes(data: &[u8]) -> Result<BadProgramsRef<'_>, ProtectorError> {
        if data.len() < BAD_PROGRAMS_HEADER_SIZE {
            return Err(ProtectorError::InsufficientByteLength);
        }
        let (header_bytes, counters) = data.split_at(BAD_PROGRAMS_HEADER_SIZE);
        // Safety: All bit patterns are valid.
        let header = unsafe { load::<BadProgramsHeader>(header_bytes) }?;
        header.verify_discriminant()?;
        if counters.len() != header.num_counters() as usize {
            return Err(ProtectorError::InsufficientByteLength);
        }

        Ok(BadProgramsRef { header, counters })
    }

    /// Loads and validates a mutable bad programs account from its raw account data.
    pub fn from_bytes_mut(data: &mut [u8]) -> Result<BadProgramsRefMut<'_>, ProtectorError> {
        if data.len() < BAD_PROGRAMS_HEADER_SIZE {
            return Err(ProtectorError::InsufficientByteLength);
        }
        let (header_bytes, counters) = data.split_at_mut(BAD_PROGRAMS_HEADER_SIZE);
        // Safety: All bit patterns are valid.
        let header = unsafe { load_mut::<BadProgramsHeader>(header_bytes) }?;
        header.verify_discriminant()?;
        if counters.len() != header.num_counters() as usize {
            return Err(ProtectorError::InsufficientByteLength);
        }

        Ok(BadProgramsRefMut { header, counters })
    }

    /// Writes a fresh header with the default filter parameters into zeroed account data.
    pub fn initialize<'a>(
        // This data should only have been initialized with zeroes, nothing else.
        zeroed_account_data: &'a mut [u8],
        authority: &Pubkey,
        bump: u8,
    ) -> Result<BadProgramsRefMut<'a>, ProtectorError> {
        if zeroed_account_data.len() != BAD_PROGRAMS_ACCOUNT_SIZE {
            return Err(ProtectorError::InsufficientByteLength);
        }
        let (header_bytes, counters) = zeroed_account_data.split_at_mut(BAD_PROGRAMS_HEADER_SIZE);
        // Safety: All bit patterns are valid.
        let header = unsafe { load_mut::<BadProgramsHeader>(header_bytes) }?;
        *header =
            BadProgramsHeader::init(authority, bump, DEFAULT_NUM_HASHES, DEFAULT_NUM_COUNTERS);

        Ok(BadProgramsRefMut { header, counters })
    }
}

impl<'a> BadProgramsRef<'a> {
    #[inline(always)]
    pub fn filter(&self) -> Result<CountingBloomFilter<'a>, ProtectorError> {
        CountingBloomFilter::new(self.header.num_hashes(), self.counters)
    }

    /// Returns `true` if the program is possibly flagged, `false` if it definitely isn't.
    #[inline(always)]
    pub fn may_contain(&self, program_id: &Pubkey) -> Result<bool, ProtectorError> {
        Ok(self.filter()?.contains(program_id))
    }
}

impl BadProgramsRefMut<'_> {
    #[inline(always)]
    pub fn filter_mut(&mut self) -> Result<CountingBloomFilterMut<'_>, ProtectorError> {
        CountingBloomFilterMut::new(self.header.num_hashes(), self.counters)
    }

    pub fn insert(&mut self, program_id: &Pubkey) -> ProtectorResult {
        self.filter_mut()?.insert(program_id);
        self.header.increment_num_entries();
        Ok(())
    }

    /// Removes a program from the filter. The entry count only changes if the program was possibly
    /// present beforehand.
    pub fn remove(&mut self, program_id: &Pubkey) -> ProtectorResult {
        let mut filter = self.filter_mut()?;
        if filter.contains(program_id) {
            filter.remove(program_id);
            self.header.decrement_num_entries();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHORITY: Pubkey = [9; 32];

    #[test]
    fn initialize_then_load() {
        let mut data = [0u8; BAD_PROGRAMS_ACCOUNT_SIZE];
        BadPrograms::initialize(&mut data, &AUTHORITY, 254).expect("Should initialize");

        let bad_programs = BadPrograms::from_bytes(&data).expect("Should load");
        assert_eq!(bad_programs.header.authority, AUTHORITY);
        assert_eq!(bad_programs.header.bump, 254);
        assert_eq!(bad_programs.header.num_hashes(), DEFAULT_NUM_HASHES);
        assert_eq!(bad_programs.header.num_counters(), DEFAULT_NUM_COUNTERS);
        assert_eq!(bad_programs.header.num_entries(), 0);
        assert_eq!(bad_programs.counters.len(), DEFAULT_NUM_COUNTERS as usize);
    }

    #[test]
    fn insert_and_remove_track_entries() {
        let mut data = [0u8; BAD_PROGRAMS_ACCOUNT_SIZE];
        let mut bad_programs = BadPrograms::initialize(&mut data, &AUTHORITY, 255).unwrap();
        let (a, b) = ([1u8; 32], [2u8; 32]);

        bad_programs.insert(&a).unwrap();
        bad_programs.insert(&b).unwrap();
        assert_eq!(bad_programs.header.num_entries(), 2);

        bad_programs.remove(&a).unwrap();
        assert_eq!(bad_programs.header.num_entries(), 1);

        let view = BadPrograms::from_bytes(&data).unwrap();
        assert!(!view.may_contain(&a).unwrap());
        assert!(view.may_contain(&b).unwrap());
    }

    #[test]
    fn removing_unflagged_program_keeps_entry_count() {
        let mut data = [0u8; BAD_PROGRAMS_ACCOUNT_SIZE];
        let mut bad_programs = BadPrograms::initialize(&mut data, &AUTHORITY, 255).unwrap();
        bad_programs.insert(&[1u8; 32]).unwrap();
        bad_programs.remove(&[3u8; 32]).unwrap();
        assert_eq!(bad_programs.header.num_entries(), 1);
    }

    #[test]
    fn rejects_zeroed_and_truncated_data() {
        let data = [0u8; BAD_PROGRAMS_ACCOUNT_SIZE];
        assert!(matches!(
            BadPrograms::from_bytes(&data),
            Err(ProtectorError::InvalidAccountDiscriminant)
        ));

        let mut data = [0u8; BAD_PROGRAMS_ACCOUNT_SIZE];
        BadPrograms::initialize(&mut data, &AUTHORITY, 255).unwrap();
        assert!(matches!(
            BadPrograms::from_bytes(&data[..BAD_PROGRAMS_ACCOUNT_SIZE - 1]),
            Err(ProtectorError::InsufficientByteLength)
        ));
        assert!(matches!(
            BadPrograms::from_bytes(&data[..10]),
            Err(ProtectorError::InsufficientByteLength)
        ));
    }
}
