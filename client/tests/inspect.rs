use mollusk_svm::result::Check;
use protector_client::{
    instructions,
    mollusk_helpers::{
        checks::IntoCheckFailure,
        new_protector_mollusk,
        utils::{
            create_bad_programs_account,
            create_instructions_sysvar_account,
            create_leader_schedule_account,
        },
    },
};
use protector_interface::{
    error::ProtectorError,
    introspection::load_instructions,
    state::leader_schedule::SlotRange,
};
use solana_account::Account;
use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

struct Fixture {
    flagged: Address,
    accounts: Vec<(Address, Account)>,
}

/// Flags one program and the slots `[100, 103]`, with the inspect instruction placed after
/// `other` in the transaction.
fn fixture(other: impl FnOnce(Address) -> Instruction) -> anyhow::Result<Fixture> {
    let authority = Address::new_unique();
    let flagged = Address::new_unique();
    let bad_programs = create_bad_programs_account(&authority, &[flagged])?;
    let leader_schedule = create_leader_schedule_account(&authority, &[SlotRange::new(100, 103)])?;
    let sysvar = create_instructions_sysvar_account(&[other(flagged), instructions::inspect()], 1);

    Ok(Fixture {
        flagged,
        accounts: vec![bad_programs, leader_schedule, sysvar],
    })
}

fn call(program_id: Address) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![AccountMeta::new(Address::new_unique(), true)],
        data: vec![1, 2, 3],
    }
}

#[test]
fn clean_transaction_passes() -> anyhow::Result<()> {
    let mut mollusk = new_protector_mollusk();
    let Fixture { accounts, .. } = fixture(|_| call(Address::new_unique()))?;

    mollusk.warp_to_slot(50);
    mollusk.process_and_validate_instruction(
        &instructions::inspect(),
        &accounts,
        &[Check::success()],
    );

    // The slot right after the flagged range is fine too.
    mollusk.warp_to_slot(104);
    mollusk.process_and_validate_instruction(
        &instructions::inspect(),
        &accounts,
        &[Check::success()],
    );

    Ok(())
}

#[test]
fn flagged_program_fails() -> anyhow::Result<()> {
    let mut mollusk = new_protector_mollusk();
    let Fixture { flagged, accounts } = fixture(call)?;
    assert_ne!(flagged, Address::default());

    mollusk.warp_to_slot(50);
    mollusk.process_and_validate_instruction(
        &instructions::inspect(),
        &accounts,
        &[ProtectorError::BadProgramDetected.into_check_failure()],
    );

    Ok(())
}

#[test]
fn flagged_leader_fails() -> anyhow::Result<()> {
    let mut mollusk = new_protector_mollusk();
    let Fixture { accounts, .. } = fixture(|_| call(Address::new_unique()))?;

    for slot in [100, 101, 103] {
        mollusk.warp_to_slot(slot);
        mollusk.process_and_validate_instruction(
            &instructions::inspect(),
            &accounts,
            &[ProtectorError::BadLeaderDetected.into_check_failure()],
        );
    }

    Ok(())
}

#[test]
fn rejects_wrong_sysvar() -> anyhow::Result<()> {
    let mut mollusk = new_protector_mollusk();
    let Fixture { accounts, .. } = fixture(|_| call(Address::new_unique()))?;

    let mut inspect = instructions::inspect();
    let fake_sysvar = Address::new_unique();
    inspect.accounts[2].pubkey = fake_sysvar;
    let mut accounts = accounts;
    accounts[2].0 = fake_sysvar;

    mollusk.warp_to_slot(50);
    mollusk.process_and_validate_instruction(
        &inspect,
        &accounts,
        &[ProtectorError::IncorrectInstructionsSysvar.into_check_failure()],
    );

    Ok(())
}

#[test]
fn inspect_skips_its_own_instruction() -> anyhow::Result<()> {
    let mut mollusk = new_protector_mollusk();
    let authority = Address::new_unique();
    let protector_id = Address::from(protector::ID);
    let accounts = vec![
        create_bad_programs_account(&authority, &[protector_id])?,
        create_leader_schedule_account(&authority, &[])?,
        create_instructions_sysvar_account(
            &[call(Address::new_unique()), instructions::inspect()],
            1,
        ),
    ];

    mollusk.warp_to_slot(50);
    mollusk.process_and_validate_instruction(
        &instructions::inspect(),
        &accounts,
        &[Check::success()],
    );

    Ok(())
}

#[test]
fn flagged_program_after_inspect_fails() -> anyhow::Result<()> {
    let mut mollusk = new_protector_mollusk();
    let authority = Address::new_unique();
    let flagged = Address::new_unique();
    let accounts = vec![
        create_bad_programs_account(&authority, &[flagged])?,
        create_leader_schedule_account(&authority, &[])?,
        create_instructions_sysvar_account(&[instructions::inspect(), call(flagged)], 0),
    ];

    mollusk.warp_to_slot(50);
    mollusk.process_and_validate_instruction(
        &instructions::inspect(),
        &accounts,
        &[ProtectorError::BadProgramDetected.into_check_failure()],
    );

    Ok(())
}

#[test]
fn sysvar_fixture_lists_every_instruction() -> anyhow::Result<()> {
    let Fixture { flagged, accounts } = fixture(call)?;

    let loaded =
        load_instructions(&accounts[2].1.data).map_err(|e| anyhow::anyhow!("{e}"))?;
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].program_id, flagged.to_bytes());
    assert_eq!(loaded[1].program_id, protector::ID);
    assert!(loaded.iter().all(|ix| ix.current_index == 1));

    Ok(())
}
