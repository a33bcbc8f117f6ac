use protector_interface::{
    introspection::{
        serialize_instructions,
        SysvarInstruction,
        INSTRUCTIONS_SYSVAR_ID,
    },
    state::{
        bad_programs::{
            BadPrograms,
            BAD_PROGRAMS_ACCOUNT_SIZE,
        },
        leader_schedule::{
            LeaderSchedule,
            SlotRange,
            LEADER_SCHEDULE_ACCOUNT_SIZE,
        },
        SYSTEM_PROGRAM_ID,
    },
};
use solana_account::Account;
use solana_address::Address;
use solana_instruction::Instruction;
use solana_sdk::{
    pubkey,
    rent::Rent,
};

use crate::pda::{
    find_bad_programs_address,
    find_leader_schedule_address,
};

pub const SYSVAR_OWNER: Address = pubkey!("Sysvar1111111111111111111111111111111111111");

/// Create the data necessary to send to [mollusk_svm::MolluskContext] to mock a funded account.
pub fn create_mock_user_account(address: Address, lamport_balance: u64) -> (Address, Account) {
    (
        address,
        Account {
            lamports: lamport_balance,
            data: vec![],
            owner: SYSTEM_PROGRAM_ID.into(),
            executable: false,
            rent_epoch: 0,
        },
    )
}

fn program_owned_account(data: Vec<u8>) -> Account {
    Account {
        lamports: Rent::default().minimum_balance(data.len()),
        data,
        owner: protector::ID.into(),
        executable: false,
        rent_epoch: 0,
    }
}

/// Builds an initialized bad programs account at its PDA with `flagged` already inserted.
pub fn create_bad_programs_account(
    authority: &Address,
    flagged: &[Address],
) -> anyhow::Result<(Address, Account)> {
    let (address, bump) = find_bad_programs_address();
    let mut data = vec![0u8; BAD_PROGRAMS_ACCOUNT_SIZE];
    let mut bad_programs = BadPrograms::initialize(&mut data, &authority.to_bytes(), bump)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    for program in flagged {
        bad_programs
            .insert(&program.to_bytes())
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }

    Ok((address, program_owned_account(data)))
}

/// Builds an initialized leader schedule account at its PDA holding `ranges`.
pub fn create_leader_schedule_account(
    authority: &Address,
    ranges: &[SlotRange],
) -> anyhow::Result<(Address, Account)> {
    let (address, bump) = find_leader_schedule_address();
    let mut data = vec![0u8; LEADER_SCHEDULE_ACCOUNT_SIZE];
    LeaderSchedule::initialize(&mut data, &authority.to_bytes(), bump)
        .and_then(|mut schedule| schedule.append(ranges))
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok((address, program_owned_account(data)))
}

/// Builds the instructions sysvar account as the runtime would for a transaction made of
/// `instructions`, currently executing the one at `current_index`.
pub fn create_instructions_sysvar_account(
    instructions: &[Instruction],
    current_index: u16,
) -> (Address, Account) {
    let sysvar_instructions = instructions
        .iter()
        .map(|ix| SysvarInstruction {
            program_id: ix.program_id.to_bytes(),
            accounts: ix
                .accounts
                .iter()
                .map(|meta| (meta.is_signer, meta.is_writable, meta.pubkey.to_bytes()))
                .collect(),
            data: ix.data.clone(),
        })
        .collect::<Vec<_>>();
    let data = serialize_instructions(&sysvar_instructions, current_index);

    (
        INSTRUCTIONS_SYSVAR_ID.into(),
        Account {
            lamports: Rent::default().minimum_balance(data.len()),
            data,
            owner: SYSVAR_OWNER,
            executable: false,
            rent_epoch: 0,
        },
    )
}
