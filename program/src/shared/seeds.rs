pub use protector_interface::seeds::{
    bad_programs::BAD_PROGRAMS_SEED, leader_schedule::LEADER_SCHEDULE_SEED,
};

/// # Example
///
/// ```ignore
/// let bump: u8 = 0x10;
/// let signer: Signer = crate::bad_programs_signer!(bump);
/// ```
#[macro_export]
macro_rules! bad_programs_signer {
    ( $bump:expr ) => {
        pinocchio::instruction::Signer::from(&pinocchio::seeds!(
            $crate::shared::seeds::BAD_PROGRAMS_SEED,
            &[$bump]
        ))
    };
}

#[macro_export]
macro_rules! leader_schedule_signer {
    ( $bump:expr ) => {
        pinocchio::instruction::Signer::from(&pinocchio::seeds!(
            $crate::shared::seeds::LEADER_SCHEDULE_SEED,
            &[$bump]
        ))
    };
}
