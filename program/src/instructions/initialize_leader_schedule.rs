use pinocchio::{account_info::AccountInfo, ProgramResult};
use protector_interface::{
    error::ProtectorError,
    state::leader_schedule::{LeaderSchedule, LEADER_SCHEDULE_ACCOUNT_SIZE},
};

use crate::{
    context::initialize_pda_context::InitializePdaContext,
    leader_schedule_signer,
    shared::{
        create_pda::{create_pda_account, find_pda_bump},
        seeds::LEADER_SCHEDULE_SEED,
    },
};

pub fn process_initialize_leader_schedule(accounts: &[AccountInfo]) -> ProgramResult {
    let ctx = InitializePdaContext::load(accounts)?;
    let bump = find_pda_bump(
        &ctx,
        LEADER_SCHEDULE_SEED,
        ProtectorError::IncorrectLeaderScheduleAccount,
    )?;

    create_pda_account(
        &ctx,
        LEADER_SCHEDULE_ACCOUNT_SIZE,
        leader_schedule_signer!(bump),
    )?;

    LeaderSchedule::initialize(
        // Safety: Single mutable borrow of the freshly created account data for the init call.
        unsafe { ctx.pda_account.info.borrow_mut_data_unchecked() },
        ctx.authority.info.key(),
        bump,
    )?;

    Ok(())
}
