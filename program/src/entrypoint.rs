use crate::instructions::*;
use pinocchio::{
    account_info::AccountInfo, msg, no_allocator, nostd_panic_handler, program_entrypoint,
    pubkey::Pubkey, ProgramResult,
};
use protector_interface::{error::ProtectorError, instructions::InstructionTag};

program_entrypoint!(process_instruction);
no_allocator!();
nostd_panic_handler!();

#[inline(always)]
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let [tag, remaining @ ..] = instruction_data else {
        return Err(ProtectorError::InvalidInstructionTag.into());
    };

    match InstructionTag::try_from(*tag)? {
        InstructionTag::Initialize => {
            msg!("Instruction: Initialize");
            process_initialize(program_id)
        }
        InstructionTag::InitializeBadPrograms => {
            msg!("Instruction: InitializeBadPrograms");
            process_initialize_bad_programs(accounts)
        }
        InstructionTag::AddBadProgram => {
            msg!("Instruction: AddBadProgram");
            process_add_bad_program(accounts, remaining)
        }
        InstructionTag::RemoveBadProgram => {
            msg!("Instruction: RemoveBadProgram");
            process_remove_bad_program(accounts, remaining)
        }
        InstructionTag::InitializeLeaderSchedule => {
            msg!("Instruction: InitializeLeaderSchedule");
            process_initialize_leader_schedule(accounts)
        }
        InstructionTag::SetLeaderSchedule => {
            msg!("Instruction: SetLeaderSchedule");
            process_set_leader_schedule(accounts, remaining)
        }
        InstructionTag::Inspect => {
            msg!("Instruction: Inspect");
            process_inspect(accounts)
        }
    }
}
