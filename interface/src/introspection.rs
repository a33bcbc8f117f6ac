//! Reads the instructions sysvar through [`pinocchio::sysvars::instructions::Instructions`].
//!
//! The sysvar data is laid out as:
//!
//! ```text
//! [u16 num_instructions]
//! [u16 offset; num_instructions]
//! for each instruction, starting at its offset:
//!     [u16 num_accounts]
//!     [u8 flags, [u8; 32] key; num_accounts]
//!     [[u8; 32] program_id]
//!     [u16 data_len]
//!     [u8; data_len]
//! [u16 current_instruction_index]
//! ```

use core::ops::Deref;

use pinocchio::{pubkey::Pubkey, sysvars::instructions::Instructions};

use crate::error::ProtectorError;

pub use pinocchio::sysvars::instructions::INSTRUCTIONS_ID as INSTRUCTIONS_SYSVAR_ID;

pub const IS_SIGNER_FLAG: u8 = 0b01;
pub const IS_WRITABLE_FLAG: u8 = 0b10;

/// The program an instruction in the current transaction is addressed to, alongside its position
/// and the position of the instruction doing the inspecting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IntrospectedInstruction {
    pub index: u16,
    pub current_index: u16,
    pub program_id: Pubkey,
}

/// Returns the summary of the instruction at `index`.
pub fn introspect<T: Deref<Target = [u8]>>(
    sysvar: &Instructions<T>,
    index: u16,
) -> Result<IntrospectedInstruction, ProtectorError> {
    let instruction = sysvar
        .load_instruction_at(index as usize)
        .map_err(|_| ProtectorError::InstructionIndexOutOfBounds)?;
    Ok(IntrospectedInstruction {
        index,
        current_index: sysvar.load_current_index(),
        program_id: *instruction.get_program_id(),
    })
}

/// Iterates over every instruction in the transaction, the current one included.
pub fn iter_instructions<T: Deref<Target = [u8]>>(
    sysvar: &Instructions<T>,
) -> InstructionsIter<'_, T> {
    InstructionsIter {
        sysvar,
        next: 0,
        len: sysvar.num_instructions() as usize,
    }
}

pub struct InstructionsIter<'s, T: Deref<Target = [u8]>> {
    sysvar: &'s Instructions<T>,
    next: usize,
    len: usize,
}

impl<T: Deref<Target = [u8]>> Iterator for InstructionsIter<'_, T> {
    type Item = Result<IntrospectedInstruction, ProtectorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let res = introspect(self.sysvar, self.next as u16);
        self.next += 1;
        Some(res)
    }
}

#[cfg(any(test, feature = "std"))]
fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Returns every instruction in serialized sysvar data.
///
/// Only the instruction count, the offset table and the trailing current index are checked
/// before the data is handed to [`Instructions`]. Instruction bodies must be well formed.
#[cfg(any(test, feature = "std"))]
pub fn load_instructions(
    data: &[u8],
) -> Result<std::vec::Vec<IntrospectedInstruction>, ProtectorError> {
    const U16_SIZE: usize = core::mem::size_of::<u16>();

    if data.len() < 2 * U16_SIZE {
        return Err(ProtectorError::InstructionsSysvarTooShort);
    }
    let num_instructions = read_u16(data, 0) as usize;
    let offsets_end = U16_SIZE + num_instructions * U16_SIZE;
    if offsets_end + U16_SIZE > data.len() {
        return Err(ProtectorError::InstructionsSysvarTooShort);
    }
    let body_end = data.len() - U16_SIZE;
    for i in 0..num_instructions {
        let offset = read_u16(data, U16_SIZE + i * U16_SIZE) as usize;
        if offset < offsets_end || offset >= body_end {
            return Err(ProtectorError::InvalidInstructionsSysvarData);
        }
    }

    // Safety: The header, offsets and current index are in bounds.
    let sysvar = unsafe { Instructions::new_unchecked(data) };
    iter_instructions(&sysvar).collect()
}

/// An owned instruction used to build instructions sysvar data off-chain.
#[cfg(any(test, feature = "std"))]
#[derive(Clone, Debug)]
pub struct SysvarInstruction {
    pub program_id: Pubkey,
    /// `(is_signer, is_writable, key)` triples.
    pub accounts: std::vec::Vec<(bool, bool, Pubkey)>,
    pub data: std::vec::Vec<u8>,
}

/// Serializes instructions into the sysvar layout with `current_index` appended.
#[cfg(any(test, feature = "std"))]
pub fn serialize_instructions(
    instructions: &[SysvarInstruction],
    current_index: u16,
) -> std::vec::Vec<u8> {
    const U16_SIZE: usize = core::mem::size_of::<u16>();

    let num = instructions.len() as u16;
    let mut data = std::vec::Vec::new();
    data.extend_from_slice(&num.to_le_bytes());
    // Offsets are patched in once each instruction's start is known.
    data.resize(U16_SIZE + instructions.len() * U16_SIZE, 0);

    for (i, ix) in instructions.iter().enumerate() {
        let start = data.len() as u16;
        let slot = U16_SIZE + i * U16_SIZE;
        data[slot..slot + U16_SIZE].copy_from_slice(&start.to_le_bytes());

        data.extend_from_slice(&(ix.accounts.len() as u16).to_le_bytes());
        for (is_signer, is_writable, key) in ix.accounts.iter() {
            let mut flags = 0u8;
            if *is_signer {
                flags |= IS_SIGNER_FLAG;
            }
            if *is_writable {
                flags |= IS_WRITABLE_FLAG;
            }
            data.push(flags);
            data.extend_from_slice(key);
        }
        data.extend_from_slice(&ix.program_id);
        data.extend_from_slice(&(ix.data.len() as u16).to_le_bytes());
        data.extend_from_slice(&ix.data);
    }

    data.extend_from_slice(&current_index.to_le_bytes());
    data
}
