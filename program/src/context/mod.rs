pub mod initialize_pda_context;
pub mod inspect_context;
pub mod set_leader_schedule_context;
pub mod update_bad_program_context;
