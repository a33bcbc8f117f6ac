use pinocchio::{
    account_info::AccountInfo, pubkey::pubkey_eq, sysvars::instructions::Instructions,
};
use protector_interface::{error::ProtectorError, introspection::INSTRUCTIONS_SYSVAR_ID};

#[derive(Clone)]
pub struct InstructionsSysvarInfo<'a> {
    pub info: &'a AccountInfo,
}

impl<'a> InstructionsSysvarInfo<'a> {
    #[inline(always)]
    pub fn new(info: &'a AccountInfo) -> Result<InstructionsSysvarInfo<'a>, ProtectorError> {
        if !pubkey_eq(info.key(), &INSTRUCTIONS_SYSVAR_ID) {
            return Err(ProtectorError::IncorrectInstructionsSysvar);
        }
        Ok(Self { info })
    }

    /// # Safety
    ///
    /// Caller guarantees there are no active mutable borrows of the sysvar data.
    #[inline(always)]
    pub unsafe fn load_unchecked(&self) -> Instructions<&'a [u8]> {
        // The runtime writes the sysvar, so its layout is trusted once the key matches.
        Instructions::new_unchecked(self.info.borrow_data_unchecked())
    }
}
