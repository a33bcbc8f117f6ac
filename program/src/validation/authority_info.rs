use pinocchio::{
    account_info::AccountInfo,
    pubkey::{pubkey_eq, Pubkey},
};
use protector_interface::error::ProtectorError;

/// A signer whose key matches the authority stored in a protector account.
#[derive(Clone)]
pub struct AuthorityInfo<'a> {
    pub info: &'a AccountInfo,
}

impl<'a> AuthorityInfo<'a> {
    /// Only checks the signature. Used when the signer becomes the authority of a new account.
    #[inline(always)]
    pub fn new_signer(info: &'a AccountInfo) -> Result<AuthorityInfo<'a>, ProtectorError> {
        if !info.is_signer() {
            return Err(ProtectorError::AuthorityMustBeSigner);
        }
        Ok(Self { info })
    }

    #[inline(always)]
    pub fn new(
        info: &'a AccountInfo,
        expected_authority: &Pubkey,
    ) -> Result<AuthorityInfo<'a>, ProtectorError> {
        let authority = Self::new_signer(info)?;
        if !pubkey_eq(info.key(), expected_authority) {
            return Err(ProtectorError::Unauthorized);
        }
        Ok(authority)
    }
}
