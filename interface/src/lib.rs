#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod error;
pub mod instructions;
pub mod introspection;
pub mod seeds;
pub mod state;
pub mod utils;

pub mod program {
    pinocchio_pubkey::declare_id!("4Lh7VjsEgG9XnShnq1CAsH37sWevuiWPfzqjWKo2s4DK");
}
