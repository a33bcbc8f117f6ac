pub mod initialize;
pub mod initialize_bad_programs;
pub mod initialize_leader_schedule;
pub mod inspect;
pub mod set_leader_schedule;
pub mod update_bad_program;

pub use {
    initialize::process_initialize,
    initialize_bad_programs::process_initialize_bad_programs,
    initialize_leader_schedule::process_initialize_leader_schedule,
    inspect::process_inspect,
    set_leader_schedule::process_set_leader_schedule,
    update_bad_program::{process_add_bad_program, process_remove_bad_program},
};
