use pinocchio::{
    account_info::AccountInfo,
    pubkey::{pubkey_eq, Pubkey},
};

#[inline(always)]
pub fn owned_by(info: &AccountInfo, potential_owner: &Pubkey) -> bool {
    pubkey_eq(info.owner(), potential_owner)
}

/// Checks if an account is owned by the protector program.
///
/// Ownership alone doesn't prove which protector account this is. Callers still need to check the
/// account discriminant and the derived address.
#[inline(always)]
pub fn is_owned_by_protector(info: &AccountInfo) -> bool {
    owned_by(info, &crate::program::ID)
}
