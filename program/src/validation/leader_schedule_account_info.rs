use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::{create_program_address, pubkey_eq},
};
use protector_interface::{
    error::ProtectorError,
    state::leader_schedule::{LeaderSchedule, LeaderScheduleRef, LeaderScheduleRefMut},
    utils::is_owned_by_protector,
};

use crate::shared::seeds::LEADER_SCHEDULE_SEED;

#[derive(Clone)]
pub struct LeaderScheduleAccountInfo<'a> {
    pub info: &'a AccountInfo,
}

impl<'a> LeaderScheduleAccountInfo<'a> {
    #[inline(always)]
    pub fn new(info: &'a AccountInfo) -> Result<LeaderScheduleAccountInfo<'a>, ProgramError> {
        if !is_owned_by_protector(info) {
            return Err(ProtectorError::InvalidAccountOwner.into());
        }
        let res = Self { info };

        // Safety: There are no active borrows on the leader schedule account data yet.
        let bump = unsafe { res.load_unchecked() }?.header.bump;
        let expected = create_program_address(&[LEADER_SCHEDULE_SEED, &[bump]], &crate::ID)?;
        if !pubkey_eq(info.key(), &expected) {
            return Err(ProtectorError::IncorrectLeaderScheduleAccount.into());
        }

        Ok(res)
    }

    /// # Safety
    ///
    /// Caller guarantees there are no active mutable borrows of the account data.
    #[inline(always)]
    pub unsafe fn load_unchecked(&self) -> Result<LeaderScheduleRef<'a>, ProtectorError> {
        LeaderSchedule::from_bytes(self.info.borrow_data_unchecked())
    }

    /// # Safety
    ///
    /// Caller guarantees there are no other active borrows of the account data.
    #[inline(always)]
    pub unsafe fn load_unchecked_mut(&self) -> Result<LeaderScheduleRefMut<'a>, ProtectorError> {
        LeaderSchedule::from_bytes_mut(self.info.borrow_mut_data_unchecked())
    }
}
