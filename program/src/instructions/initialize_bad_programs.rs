use pinocchio::{account_info::AccountInfo, ProgramResult};
use protector_interface::{
    error::ProtectorError,
    state::bad_programs::{BadPrograms, BAD_PROGRAMS_ACCOUNT_SIZE},
};

use crate::{
    bad_programs_signer,
    context::initialize_pda_context::InitializePdaContext,
    shared::{
        create_pda::{create_pda_account, find_pda_bump},
        seeds::BAD_PROGRAMS_SEED,
    },
};

pub fn process_initialize_bad_programs(accounts: &[AccountInfo]) -> ProgramResult {
    let ctx = InitializePdaContext::load(accounts)?;
    let bump = find_pda_bump(
        &ctx,
        BAD_PROGRAMS_SEED,
        ProtectorError::IncorrectBadProgramsAccount,
    )?;

    create_pda_account(&ctx, BAD_PROGRAMS_ACCOUNT_SIZE, bad_programs_signer!(bump))?;

    BadPrograms::initialize(
        // Safety: Single mutable borrow of the freshly created account data for the init call.
        unsafe { ctx.pda_account.info.borrow_mut_data_unchecked() },
        ctx.authority.info.key(),
        bump,
    )?;

    Ok(())
}
