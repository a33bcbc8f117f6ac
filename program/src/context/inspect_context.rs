use pinocchio::{account_info::AccountInfo, program_error::ProgramError};
use protector_interface::error::ProtectorError;

use crate::validation::{
    bad_programs_account_info::BadProgramsAccountInfo,
    instructions_sysvar_info::InstructionsSysvarInfo,
    leader_schedule_account_info::LeaderScheduleAccountInfo,
};

#[derive(Clone)]
pub struct InspectContext<'a> {
    pub bad_programs: BadProgramsAccountInfo<'a>,
    pub leader_schedule: LeaderScheduleAccountInfo<'a>,
    pub instructions_sysvar: InstructionsSysvarInfo<'a>,
}

impl<'a> InspectContext<'a> {
    pub fn load(accounts: &'a [AccountInfo]) -> Result<InspectContext<'a>, ProgramError> {
        let [bad_programs, leader_schedule, instructions_sysvar] = accounts else {
            return Err(ProtectorError::NotEnoughAccountKeys.into());
        };

        Ok(Self {
            bad_programs: BadProgramsAccountInfo::new(bad_programs)?,
            leader_schedule: LeaderScheduleAccountInfo::new(leader_schedule)?,
            instructions_sysvar: InstructionsSysvarInfo::new(instructions_sysvar)?,
        })
    }
}
