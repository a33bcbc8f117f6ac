//! PDA helpers for deriving `protector` program addresses.

use solana_sdk::pubkey::Pubkey;

pub fn find_bad_programs_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[protector::BAD_PROGRAMS_SEED], &protector::ID.into())
}

pub fn find_leader_schedule_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[protector::LEADER_SCHEDULE_SEED], &protector::ID.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_distinct() {
        let (bad_programs, _) = find_bad_programs_address();
        let (leader_schedule, _) = find_leader_schedule_address();
        assert_ne!(bad_programs, leader_schedule);
        assert!(!bad_programs.is_on_curve());
        assert!(!leader_schedule.is_on_curve());
    }
}
