pub mod authority_info;
pub mod bad_programs_account_info;
pub mod instructions_sysvar_info;
pub mod leader_schedule_account_info;
pub mod system_program_info;
pub mod uninitialized_account_info;
