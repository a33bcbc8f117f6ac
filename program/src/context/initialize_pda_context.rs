use pinocchio::account_info::AccountInfo;
use protector_interface::error::ProtectorError;

use crate::validation::{
    authority_info::AuthorityInfo, system_program_info::SystemProgramInfo,
    uninitialized_account_info::UninitializedAccountInfo,
};

/// The accounts for `InitializeBadPrograms` and `InitializeLeaderSchedule`.
#[derive(Clone)]
pub struct InitializePdaContext<'a> {
    pub authority: AuthorityInfo<'a>,
    pub pda_account: UninitializedAccountInfo<'a>,
    pub system_program: SystemProgramInfo<'a>,
}

impl<'a> InitializePdaContext<'a> {
    pub fn load(accounts: &'a [AccountInfo]) -> Result<InitializePdaContext<'a>, ProtectorError> {
        let [authority, pda_account, system_program] = accounts else {
            return Err(ProtectorError::NotEnoughAccountKeys);
        };

        // The address derivation is checked by each instruction against its own seed.
        let authority = AuthorityInfo::new_signer(authority)?;
        let pda_account = UninitializedAccountInfo::new(pda_account)?;
        let system_program = SystemProgramInfo::new_unchecked(system_program);

        Ok(Self {
            authority,
            pda_account,
            system_program,
        })
    }
}
