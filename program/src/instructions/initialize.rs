use pinocchio::{
    msg,
    pubkey::{self, Pubkey},
    ProgramResult,
};

pub fn process_initialize(program_id: &Pubkey) -> ProgramResult {
    msg!("Greetings from:");
    pubkey::log(program_id);
    Ok(())
}
