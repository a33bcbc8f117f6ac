use pinocchio::{
    account_info::AccountInfo,
    sysvars::{clock::Clock, Sysvar},
    ProgramResult,
};
use protector_interface::{error::ProtectorError, introspection::iter_instructions};

use crate::{context::inspect_context::InspectContext, debug};

/// Fails the transaction if any other instruction in it targets a flagged program, or if the
/// current slot is led by a flagged validator.
pub fn process_inspect(accounts: &[AccountInfo]) -> ProgramResult {
    let ctx = InspectContext::load(accounts)?;

    // Safety: The instructions sysvar is never mutably borrowed.
    let sysvar = unsafe { ctx.instructions_sysvar.load_unchecked() };
    // Safety: No mutable borrows of the bad programs account data.
    let bad_programs = unsafe { ctx.bad_programs.load_unchecked() }?;
    let filter = bad_programs.filter()?;

    for instruction in iter_instructions(&sysvar) {
        let instruction = instruction?;
        if instruction.index == instruction.current_index {
            continue;
        }
        if filter.contains(&instruction.program_id) {
            debug!("flagged program at instruction {}", instruction.index);
            return Err(ProtectorError::BadProgramDetected.into());
        }
    }

    let slot = Clock::get()?.slot;
    // Safety: No mutable borrows of the leader schedule account data.
    let schedule = unsafe { ctx.leader_schedule.load_unchecked() }?;
    if schedule.contains(slot) {
        debug!("flagged leader at slot {}", slot);
        return Err(ProtectorError::BadLeaderDetected.into());
    }

    Ok(())
}
