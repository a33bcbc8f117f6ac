//! Seeds for the protector program's derived addresses.

pub mod bad_programs {
    pub const BAD_PROGRAMS_SEED: &[u8] = b"BadPrograms";
}

pub mod leader_schedule {
    pub const LEADER_SCHEDULE_SEED: &[u8] = b"LeaderSchedule";
}
