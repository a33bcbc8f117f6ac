use anyhow::anyhow;
use mollusk_svm::result::Check;
use protector_client::{
    instructions,
    mollusk_helpers::{
        checks::IntoCheckFailure,
        new_protector_mollusk_context,
        utils::create_mock_user_account,
    },
    pda::find_bad_programs_address,
};
use protector_interface::{
    error::ProtectorError,
    state::bad_programs::{
        BadPrograms,
        BAD_PROGRAMS_ACCOUNT_DISCRIMINANT,
        BAD_PROGRAMS_ACCOUNT_SIZE,
    },
};
use solana_address::Address;

#[test]
fn initialize_bad_programs() -> anyhow::Result<()> {
    let mock_authority = create_mock_user_account(Address::new_unique(), 100_000_000_000);
    let authority = mock_authority.0;
    let mollusk = new_protector_mollusk_context(vec![mock_authority]);
    let (bad_programs_address, bump) = find_bad_programs_address();

    let res = mollusk.process_and_validate_instruction(
        &instructions::initialize_bad_programs(authority),
        &[
            Check::success(),
            Check::account(&bad_programs_address)
                .executable(false)
                .owner(&protector::ID.into())
                .rent_exempt()
                .space(BAD_PROGRAMS_ACCOUNT_SIZE)
                .build(),
        ],
    );

    let data = &res
        .get_account(&bad_programs_address)
        .ok_or(anyhow!("Couldn't find bad programs account"))?
        .data;
    let bad_programs = BadPrograms::from_bytes(data).map_err(|e| anyhow!("{e}"))?;
    assert_eq!(
        bad_programs.header.discriminant(),
        BAD_PROGRAMS_ACCOUNT_DISCRIMINANT
    );
    assert_eq!(bad_programs.header.authority, authority.to_bytes());
    assert_eq!(bad_programs.header.bump, bump);
    assert_eq!(bad_programs.header.num_entries(), 0);
    assert!(bad_programs.counters.iter().all(|c| *c == 0));

    // The account can't be initialized twice.
    mollusk.process_and_validate_instruction(
        &instructions::initialize_bad_programs(authority),
        &[ProtectorError::AlreadyInitializedAccount.into_check_failure()],
    );

    Ok(())
}

#[test]
fn add_and_remove_bad_program() -> anyhow::Result<()> {
    let mock_authority = create_mock_user_account(Address::new_unique(), 100_000_000_000);
    let authority = mock_authority.0;
    let mollusk = new_protector_mollusk_context(vec![mock_authority]);
    let (bad_programs_address, _) = find_bad_programs_address();
    let flagged = Address::new_unique();

    assert!(mollusk
        .process_instruction_chain(&[
            instructions::initialize_bad_programs(authority),
            instructions::add_bad_program(authority, flagged),
        ])
        .program_result
        .is_ok());

    let may_contain = |program: &Address| -> anyhow::Result<(bool, u32)> {
        let store = mollusk.account_store.borrow();
        let account = store
            .get(&bad_programs_address)
            .ok_or(anyhow!("Couldn't find bad programs account"))?;
        let bad_programs = BadPrograms::from_bytes(&account.data).map_err(|e| anyhow!("{e}"))?;
        let contains = bad_programs
            .may_contain(&program.to_bytes())
            .map_err(|e| anyhow!("{e}"))?;
        Ok((contains, bad_programs.header.num_entries()))
    };

    assert_eq!(may_contain(&flagged)?, (true, 1));
    assert!(!may_contain(&Address::new_unique())?.0);

    mollusk.process_and_validate_instruction(
        &instructions::remove_bad_program(authority, flagged),
        &[Check::success()],
    );
    assert_eq!(may_contain(&flagged)?, (false, 0));

    Ok(())
}

#[test]
fn only_the_authority_updates_bad_programs() {
    let mock_authority = create_mock_user_account(Address::new_unique(), 100_000_000_000);
    let mock_intruder = create_mock_user_account(Address::new_unique(), 100_000_000_000);
    let (authority, intruder) = (mock_authority.0, mock_intruder.0);
    let mollusk = new_protector_mollusk_context(vec![mock_authority, mock_intruder]);

    mollusk.process_and_validate_instruction(
        &instructions::initialize_bad_programs(authority),
        &[Check::success()],
    );

    mollusk.process_and_validate_instruction(
        &instructions::add_bad_program(intruder, Address::new_unique()),
        &[ProtectorError::Unauthorized.into_check_failure()],
    );

    let mut unsigned = instructions::add_bad_program(authority, Address::new_unique());
    unsigned.accounts[0].is_signer = false;
    mollusk.process_and_validate_instruction(
        &unsigned,
        &[ProtectorError::AuthorityMustBeSigner.into_check_failure()],
    );
}

#[test]
fn bad_programs_must_be_initialized() {
    let mock_authority = create_mock_user_account(Address::new_unique(), 100_000_000_000);
    let authority = mock_authority.0;
    let mollusk = new_protector_mollusk_context(vec![mock_authority]);

    // The default account in the store is owned by the system program.
    mollusk.process_and_validate_instruction(
        &instructions::add_bad_program(authority, Address::new_unique()),
        &[ProtectorError::InvalidAccountOwner.into_check_failure()],
    );
}
