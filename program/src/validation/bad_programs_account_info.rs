use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::{create_program_address, pubkey_eq},
};
use protector_interface::{
    error::ProtectorError,
    state::bad_programs::{BadPrograms, BadProgramsRef, BadProgramsRefMut},
    utils::is_owned_by_protector,
};

use crate::shared::seeds::BAD_PROGRAMS_SEED;

#[derive(Clone)]
pub struct BadProgramsAccountInfo<'a> {
    pub info: &'a AccountInfo,
}

impl<'a> BadProgramsAccountInfo<'a> {
    /// Checks the owner, the account discriminant and that the account lives at the address
    /// derived from its stored bump.
    #[inline(always)]
    pub fn new(info: &'a AccountInfo) -> Result<BadProgramsAccountInfo<'a>, ProgramError> {
        if !is_owned_by_protector(info) {
            return Err(ProtectorError::InvalidAccountOwner.into());
        }
        let res = Self { info };

        // Safety: There are no active borrows on the bad programs account data yet.
        let bump = unsafe { res.load_unchecked() }?.header.bump;
        let expected = create_program_address(&[BAD_PROGRAMS_SEED, &[bump]], &crate::ID)?;
        if !pubkey_eq(info.key(), &expected) {
            return Err(ProtectorError::IncorrectBadProgramsAccount.into());
        }

        Ok(res)
    }

    /// # Safety
    ///
    /// Caller guarantees there are no active mutable borrows of the account data.
    #[inline(always)]
    pub unsafe fn load_unchecked(&self) -> Result<BadProgramsRef<'a>, ProtectorError> {
        BadPrograms::from_bytes(self.info.borrow_data_unchecked())
    }

    /// # Safety
    ///
    /// Caller guarantees there are no other active borrows of the account data.
    #[inline(always)]
    pub unsafe fn load_unchecked_mut(&self) -> Result<BadProgramsRefMut<'a>, ProtectorError> {
        BadPrograms::from_bytes_mut(self.info.borrow_mut_data_unchecked())
    }
}
