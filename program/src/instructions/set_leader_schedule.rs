use pinocchio::{account_info::AccountInfo, ProgramResult};
use protector_interface::instructions::set_leader_schedule::SetLeaderScheduleArgs;

use crate::{context::set_leader_schedule_context::SetLeaderScheduleContext, debug};

pub fn process_set_leader_schedule(
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let args = SetLeaderScheduleArgs::unpack(instruction_data)?;
    let ctx = SetLeaderScheduleContext::load(accounts)?;

    // Safety: Single mutable borrow of the leader schedule account data.
    let mut schedule = unsafe { ctx.leader_schedule.load_unchecked_mut() }?;
    if args.reset {
        schedule.clear();
    }
    // A failed append leaves the cleared schedule in place, but the whole transaction reverts.
    schedule.append(args.ranges)?;
    debug!("ranges: {}", schedule.header.num_ranges());

    Ok(())
}
