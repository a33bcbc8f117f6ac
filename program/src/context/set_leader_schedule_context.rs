use pinocchio::{account_info::AccountInfo, program_error::ProgramError};
use protector_interface::error::ProtectorError;

use crate::validation::{
    authority_info::AuthorityInfo, leader_schedule_account_info::LeaderScheduleAccountInfo,
};

#[derive(Clone)]
pub struct SetLeaderScheduleContext<'a> {
    pub authority: AuthorityInfo<'a>,
    pub leader_schedule: LeaderScheduleAccountInfo<'a>,
}

impl<'a> SetLeaderScheduleContext<'a> {
    pub fn load(accounts: &'a [AccountInfo]) -> Result<SetLeaderScheduleContext<'a>, ProgramError> {
        let [authority, leader_schedule] = accounts else {
            return Err(ProtectorError::NotEnoughAccountKeys.into());
        };

        let leader_schedule = LeaderScheduleAccountInfo::new(leader_schedule)?;
        // Safety: There are no active mutable borrows on the leader schedule account data.
        let stored_authority = unsafe { leader_schedule.load_unchecked() }?.header.authority;
        let authority = AuthorityInfo::new(authority, &stored_authority)?;

        Ok(Self {
            authority,
            leader_schedule,
        })
    }
}
