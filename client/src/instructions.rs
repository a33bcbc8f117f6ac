//! Builders for every `protector` instruction.

use protector_interface::{
    instructions::{
        set_leader_schedule::SetLeaderScheduleArgs,
        update_bad_program::UpdateBadProgramInstructionData,
        InstructionTag,
    },
    introspection::INSTRUCTIONS_SYSVAR_ID,
    state::{
        leader_schedule::SlotRange,
        SYSTEM_PROGRAM_ID,
    },
};
use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

use crate::pda::{
    find_bad_programs_address,
    find_leader_schedule_address,
};

pub fn program_id() -> Address {
    protector::ID.into()
}

pub fn initialize() -> Instruction {
    Instruction {
        program_id: program_id(),
        accounts: vec![],
        data: vec![InstructionTag::Initialize as u8],
    }
}

fn initialize_pda(authority: Address, pda: Address, tag: InstructionTag) -> Instruction {
    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new(pda, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID.into(), false),
        ],
        data: vec![tag as u8],
    }
}

pub fn initialize_bad_programs(authority: Address) -> Instruction {
    let (bad_programs, _) = find_bad_programs_address();
    initialize_pda(authority, bad_programs, InstructionTag::InitializeBadPrograms)
}

pub fn initialize_leader_schedule(authority: Address) -> Instruction {
    let (leader_schedule, _) = find_leader_schedule_address();
    initialize_pda(
        authority,
        leader_schedule,
        InstructionTag::InitializeLeaderSchedule,
    )
}

fn update_bad_program(authority: Address, program: Address, tag: InstructionTag) -> Instruction {
    let (bad_programs, _) = find_bad_programs_address();
    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new_readonly(authority, true),
            AccountMeta::new(bad_programs, false),
        ],
        data: UpdateBadProgramInstructionData::new(program.to_bytes())
            .pack(tag)
            .to_vec(),
    }
}

pub fn add_bad_program(authority: Address, program: Address) -> Instruction {
    update_bad_program(authority, program, InstructionTag::AddBadProgram)
}

pub fn remove_bad_program(authority: Address, program: Address) -> Instruction {
    update_bad_program(authority, program, InstructionTag::RemoveBadProgram)
}

pub fn set_leader_schedule(authority: Address, reset: bool, ranges: &[SlotRange]) -> Instruction {
    let (leader_schedule, _) = find_leader_schedule_address();
    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new_readonly(authority, true),
            AccountMeta::new(leader_schedule, false),
        ],
        data: SetLeaderScheduleArgs { reset, ranges }.pack(),
    }
}

/// The instruction a user appends to their own transaction to have it checked.
pub fn inspect() -> Instruction {
    let (bad_programs, _) = find_bad_programs_address();
    let (leader_schedule, _) = find_leader_schedule_address();
    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new_readonly(bad_programs, false),
            AccountMeta::new_readonly(leader_schedule, false),
            AccountMeta::new_readonly(INSTRUCTIONS_SYSVAR_ID.into(), false),
        ],
        data: vec![InstructionTag::Inspect as u8],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_leader_schedule_data() {
        let authority = Address::new_unique();
        let ix = set_leader_schedule(authority, true, &[SlotRange::new(5, 8)]);
        assert_eq!(ix.data[0], InstructionTag::SetLeaderSchedule as u8);

        let args = SetLeaderScheduleArgs::unpack(&ix.data[1..]).unwrap();
        assert!(args.reset);
        assert_eq!(args.ranges, &[SlotRange::new(5, 8)]);
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts[1].is_writable);
    }

    #[test]
    fn inspect_accounts_are_readonly() {
        let ix = inspect();
        assert_eq!(ix.data, vec![InstructionTag::Inspect as u8]);
        assert!(ix.accounts.iter().all(|meta| !meta.is_writable && !meta.is_signer));
        assert_eq!(ix.accounts[2].pubkey, Address::from(INSTRUCTIONS_SYSVAR_ID));
    }
}
