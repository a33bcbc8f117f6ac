use pinocchio::{account_info::AccountInfo, program_error::ProgramError};
use protector_interface::error::ProtectorError;

use crate::validation::{
    authority_info::AuthorityInfo, bad_programs_account_info::BadProgramsAccountInfo,
};

#[derive(Clone)]
pub struct UpdateBadProgramContext<'a> {
    pub authority: AuthorityInfo<'a>,
    pub bad_programs: BadProgramsAccountInfo<'a>,
}

impl<'a> UpdateBadProgramContext<'a> {
    pub fn load(accounts: &'a [AccountInfo]) -> Result<UpdateBadProgramContext<'a>, ProgramError> {
        let [authority, bad_programs] = accounts else {
            return Err(ProtectorError::NotEnoughAccountKeys.into());
        };

        let bad_programs = BadProgramsAccountInfo::new(bad_programs)?;
        // Safety: There are no active mutable borrows on the bad programs account data.
        let stored_authority = unsafe { bad_programs.load_unchecked() }?.header.authority;
        let authority = AuthorityInfo::new(authority, &stored_authority)?;

        Ok(Self {
            authority,
            bad_programs,
        })
    }
}
