use mollusk_svm::result::Check;
use protector_interface::error::ProtectorError;
use solana_program_error::ProgramError;

/// Extension trait for converting a [`ProtectorError`] directly into a [`Check`] that asserts
/// the instruction failed with that error.
pub trait IntoCheckFailure {
    fn into_check_failure(self) -> Check<'static>;
}

impl IntoCheckFailure for ProtectorError {
    fn into_check_failure(self) -> Check<'static> {
        Check::err(ProgramError::Custom(self as u32))
    }
}
