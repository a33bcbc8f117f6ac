use anyhow::Context;
use colored::Colorize;
use protector_interface::{
    error::ProtectorError,
    instructions::InstructionTag,
};
use solana_client::{
    client_error::{
        ClientError,
        ClientErrorKind,
    },
    rpc_client::RpcClient,
    rpc_response::RpcSimulateTransactionResult,
};
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_sdk::{
    message::Message,
    signature::{
        Signature,
        Signer,
    },
    transaction::Transaction,
};

use crate::logs::{
    log_error,
    log_info,
    log_success,
    LogColor,
};

#[derive(Clone, Copy, Debug)]
pub struct SendTransactionConfig {
    pub compute_budget: Option<u32>,
    pub debug_logs: Option<bool>,
}

impl Default for SendTransactionConfig {
    fn default() -> Self {
        SendTransactionConfig {
            compute_budget: Default::default(),
            debug_logs: Some(true),
        }
    }
}

pub async fn send_transaction_with_config(
    rpc: &RpcClient,
    payer: &Keypair,
    signers: &[&Keypair],
    instructions: &[Instruction],
    config: Option<SendTransactionConfig>,
) -> anyhow::Result<Signature> {
    let bh = rpc
        .get_latest_blockhash()
        .context("Couldn't fetch the latest blockhash")?;

    let SendTransactionConfig {
        compute_budget,
        debug_logs,
    } = config.unwrap_or_default();

    let msg = Message::new(
        &[
            compute_budget.map_or(vec![], |budget| {
                vec![
                    ComputeBudgetInstruction::set_compute_unit_limit(budget),
                    ComputeBudgetInstruction::set_compute_unit_price(1),
                ]
            }),
            instructions.to_vec(),
        ]
        .concat(),
        Some(&payer.pubkey()),
    );

    let mut tx = Transaction::new_unsigned(msg);
    tx.try_sign(
        &std::iter::once(payer)
            .chain(signers.iter().copied())
            .collect::<Vec<_>>(),
        bh,
    )
    .context("Couldn't sign the transaction")?;

    match rpc.send_and_confirm_transaction(&tx) {
        Ok(sig) => {
            if matches!(debug_logs, Some(true)) {
                let sender_info = format!("{}: {}", "sender".color(LogColor::Gray), payer.pubkey());
                log_success("Signature", format!("{sig}\n{sender_info}"));
            }
            Ok(sig)
        }
        Err(error) => {
            // The compute budget instructions shift the failing instruction's index.
            let offset = if compute_budget.is_some() { 2 } else { 0 };
            log_instruction_error(&error, instructions, offset);
            log_info("Payer", payer.pubkey());

            Err(error).context("Failed transaction submission")
        }
    }
}

/// Decodes a failed `protector` instruction from a preflight error into its tag and
/// [`ProtectorError`].
pub fn decode_protector_error(tag: u8, code: u32) -> Option<(InstructionTag, ProtectorError)> {
    let tag = InstructionTag::from_repr(tag)?;
    let error = u8::try_from(code).ok().and_then(ProtectorError::from_repr)?;
    Some((tag, error))
}

pub fn log_instruction_error(error: &ClientError, instructions: &[Instruction], offset: usize) {
    use solana_client::rpc_request::{
        RpcError::RpcResponseError,
        RpcResponseErrorData,
    };
    use solana_instruction_error::InstructionError;
    use solana_transaction_error::TransactionError;

    let kind = error.kind();
    let ClientErrorKind::RpcError(RpcResponseError {
        data:
            RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                err: Some(ui_err),
                ..
            }),
        ..
    }) = kind
    else {
        log_error("Client error", error);
        return;
    };

    let TransactionError::InstructionError(ixn_idx, ixn_error) = ui_err.clone().into() else {
        log_error("Transaction error", error);
        return;
    };

    let instruction = (ixn_idx as usize)
        .checked_sub(offset)
        .and_then(|idx| instructions.get(idx));
    match (instruction, ixn_error) {
        (Some(instruction), InstructionError::Custom(code))
            if instruction.program_id.as_ref() == protector::ID =>
        {
            let tag = instruction.data.first().copied().unwrap_or(u8::MAX);
            match decode_protector_error(tag, code) {
                Some((tag, error)) => log_error("Protector error", format!("({tag}, {error})")),
                None => log_error("Unknown protector error", code),
            }
        }
        (_, ixn_error) => log_error("Instruction error", ixn_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_errors() {
        let (tag, error) = decode_protector_error(
            InstructionTag::Inspect as u8,
            ProtectorError::BadLeaderDetected as u32,
        )
        .unwrap();
        assert_eq!(tag, InstructionTag::Inspect);
        assert_eq!(error, ProtectorError::BadLeaderDetected);

        assert!(decode_protector_error(200, 0).is_none());
        assert!(decode_protector_error(0, 1_000).is_none());
    }
}
