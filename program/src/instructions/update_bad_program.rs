use pinocchio::{account_info::AccountInfo, ProgramResult};
use protector_interface::{
    instructions::update_bad_program::UpdateBadProgramInstructionData,
    state::transmutable::load,
};

use crate::{context::update_bad_program_context::UpdateBadProgramContext, debug};

pub fn process_add_bad_program(accounts: &[AccountInfo], instruction_data: &[u8]) -> ProgramResult {
    // Safety: All bit patterns are valid.
    let args = unsafe { load::<UpdateBadProgramInstructionData>(instruction_data) }?;
    let ctx = UpdateBadProgramContext::load(accounts)?;

    // Safety: Single mutable borrow of the bad programs account data.
    let mut bad_programs = unsafe { ctx.bad_programs.load_unchecked_mut() }?;
    bad_programs.insert(args.program_id())?;
    debug!("entries: {}", bad_programs.header.num_entries());

    Ok(())
}

pub fn process_remove_bad_program(
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    // Safety: All bit patterns are valid.
    let args = unsafe { load::<UpdateBadProgramInstructionData>(instruction_data) }?;
    let ctx = UpdateBadProgramContext::load(accounts)?;

    // Safety: Single mutable borrow of the bad programs account data.
    let mut bad_programs = unsafe { ctx.bad_programs.load_unchecked_mut() }?;
    bad_programs.remove(args.program_id())?;
    debug!("entries: {}", bad_programs.header.num_entries());

    Ok(())
}
