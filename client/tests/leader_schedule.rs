use anyhow::anyhow;
use mollusk_svm::result::Check;
use protector_client::{
    instructions,
    mollusk_helpers::{
        checks::IntoCheckFailure,
        new_protector_mollusk_context,
        utils::create_mock_user_account,
    },
    pda::find_leader_schedule_address,
};
use protector_interface::{
    error::ProtectorError,
    instructions::set_leader_schedule::MAX_SLOT_RANGES_PER_INSTRUCTION,
    state::leader_schedule::{
        LeaderSchedule,
        SlotRange,
        LEADER_SCHEDULE_ACCOUNT_SIZE,
        MAX_SLOT_RANGES,
    },
};
use solana_account::Account;
use solana_address::Address;

type AccountStore = std::collections::HashMap<Address, Account>;

fn stored_ranges(
    mollusk: &mollusk_svm::MolluskContext<AccountStore>,
) -> anyhow::Result<Vec<SlotRange>> {
    let (address, _) = find_leader_schedule_address();
    let store = mollusk.account_store.borrow();
    let account = store
        .get(&address)
        .ok_or(anyhow!("Couldn't find leader schedule account"))?;
    let schedule = LeaderSchedule::from_bytes(&account.data).map_err(|e| anyhow!("{e}"))?;
    Ok(schedule.ranges().to_vec())
}

#[test]
fn initialize_and_set_leader_schedule() -> anyhow::Result<()> {
    let mock_authority = create_mock_user_account(Address::new_unique(), 100_000_000_000);
    let authority = mock_authority.0;
    let mollusk = new_protector_mollusk_context(vec![mock_authority]);
    let (leader_schedule_address, _) = find_leader_schedule_address();

    mollusk.process_and_validate_instruction(
        &instructions::initialize_leader_schedule(authority),
        &[
            Check::success(),
            Check::account(&leader_schedule_address)
                .owner(&protector::ID.into())
                .rent_exempt()
                .space(LEADER_SCHEDULE_ACCOUNT_SIZE)
                .build(),
        ],
    );
    assert!(stored_ranges(&mollusk)?.is_empty());

    let first = [SlotRange::new(10, 13), SlotRange::new(40, 43)];
    let second = [SlotRange::new(80, 80)];
    assert!(mollusk
        .process_instruction_chain(&[
            instructions::set_leader_schedule(authority, true, &first),
            instructions::set_leader_schedule(authority, false, &second),
        ])
        .program_result
        .is_ok());
    assert_eq!(stored_ranges(&mollusk)?, [first.as_slice(), &second].concat());

    // A reset replaces everything stored so far.
    let replacement = [SlotRange::new(5, 6)];
    mollusk.process_and_validate_instruction(
        &instructions::set_leader_schedule(authority, true, &replacement),
        &[Check::success()],
    );
    assert_eq!(stored_ranges(&mollusk)?, replacement);

    Ok(())
}

#[test]
fn rejects_invalid_ranges() -> anyhow::Result<()> {
    let mock_authority = create_mock_user_account(Address::new_unique(), 100_000_000_000);
    let authority = mock_authority.0;
    let mollusk = new_protector_mollusk_context(vec![mock_authority]);

    mollusk.process_and_validate_instruction(
        &instructions::initialize_leader_schedule(authority),
        &[Check::success()],
    );
    mollusk.process_and_validate_instruction(
        &instructions::set_leader_schedule(authority, false, &[SlotRange::new(100, 110)]),
        &[Check::success()],
    );

    mollusk.process_and_validate_instruction(
        &instructions::set_leader_schedule(authority, false, &[SlotRange::new(9, 8)]),
        &[ProtectorError::InvalidSlotRange.into_check_failure()],
    );
    // Overlaps the stored range.
    mollusk.process_and_validate_instruction(
        &instructions::set_leader_schedule(authority, false, &[SlotRange::new(110, 120)]),
        &[ProtectorError::UnsortedSlotRanges.into_check_failure()],
    );
    mollusk.process_and_validate_instruction(
        &instructions::set_leader_schedule(
            authority,
            false,
            &[SlotRange::new(300, 301), SlotRange::new(200, 201)],
        ),
        &[ProtectorError::UnsortedSlotRanges.into_check_failure()],
    );
    mollusk.process_and_validate_instruction(
        &instructions::set_leader_schedule(Address::new_unique(), false, &[]),
        &[ProtectorError::Unauthorized.into_check_failure()],
    );

    assert_eq!(stored_ranges(&mollusk)?, [SlotRange::new(100, 110)]);

    Ok(())
}

#[test]
fn leader_schedule_capacity() -> anyhow::Result<()> {
    let mock_authority = create_mock_user_account(Address::new_unique(), 100_000_000_000);
    let authority = mock_authority.0;
    let mollusk = new_protector_mollusk_context(vec![mock_authority]);

    mollusk.process_and_validate_instruction(
        &instructions::initialize_leader_schedule(authority),
        &[Check::success()],
    );

    let ranges = (0..MAX_SLOT_RANGES as u64)
        .map(|i| SlotRange::new(i * 4, i * 4 + 3))
        .collect::<Vec<_>>();
    for (i, chunk) in ranges.chunks(MAX_SLOT_RANGES_PER_INSTRUCTION).enumerate() {
        mollusk.process_and_validate_instruction(
            &instructions::set_leader_schedule(authority, i == 0, chunk),
            &[Check::success()],
        );
    }
    assert_eq!(stored_ranges(&mollusk)?.len(), MAX_SLOT_RANGES);

    let next_start = MAX_SLOT_RANGES as u64 * 4;
    mollusk.process_and_validate_instruction(
        &instructions::set_leader_schedule(
            authority,
            false,
            &[SlotRange::new(next_start, next_start)],
        ),
        &[ProtectorError::LeaderScheduleFull.into_check_failure()],
    );

    Ok(())
}
