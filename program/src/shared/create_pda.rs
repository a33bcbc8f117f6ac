use pinocchio::{
    instruction::Signer,
    program_error::ProgramError,
    pubkey::{pubkey_eq, try_find_program_address},
    sysvars::{rent::Rent, Sysvar},
    ProgramResult,
};
use protector_interface::error::ProtectorError;

use crate::context::initialize_pda_context::InitializePdaContext;

/// Finds the canonical bump for a single-seed PDA and fails with `incorrect_account` if the
/// passed account isn't at that address.
pub fn find_pda_bump(
    ctx: &InitializePdaContext,
    seed: &[u8],
    incorrect_account: ProtectorError,
) -> Result<u8, ProgramError> {
    let (expected, bump) =
        try_find_program_address(&[seed], &crate::ID).ok_or(ProgramError::InvalidSeeds)?;
    if !pubkey_eq(ctx.pda_account.info.key(), &expected) {
        return Err(incorrect_account.into());
    }
    Ok(bump)
}

/// Creates the rent-exempt, program owned PDA with `space` bytes, paid for by the authority.
pub fn create_pda_account(
    ctx: &InitializePdaContext,
    space: usize,
    signer: Signer,
) -> ProgramResult {
    let lamports_required = Rent::get()?.minimum_balance(space);

    pinocchio_system::instructions::CreateAccount {
        from: ctx.authority.info,
        to: ctx.pda_account.info,
        lamports: lamports_required,
        space: space as u64,
        owner: &crate::ID,
    }
    .invoke_signed(&[signer])
}
